use anyhow::{Context, Result};
use pill_types::{Reminder, Slot};
use reqwest::Url;

/// Query parameters of a `GET /update` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenserRequest {
    pub name: String,
    pub slot: Slot,
    /// 24-hour clock
    pub hour: u32,
    pub minute: u32,
}

impl DispenserRequest {
    /// Reminders without a slot go to slot 1.
    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            name: reminder.name.clone(),
            slot: reminder.slot.unwrap_or_default(),
            hour: reminder.time.hour(),
            minute: reminder.time.minute(),
        }
    }

    pub fn url(&self, address: &str) -> Result<Url> {
        let base = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        };

        let mut url = Url::parse(&base)
            .with_context(|| format!("Invalid dispenser address: {}", address))?;
        url.set_path("/update");
        url.query_pairs_mut()
            .clear()
            .append_pair("name", &self.name)
            .append_pair("slot", self.slot.as_str())
            .append_pair("hour", &self.hour.to_string())
            .append_pair("minute", &self.minute.to_string());

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pill_types::ReminderTime;

    #[test]
    fn test_from_reminder_uses_24_hour_clock() {
        let reminder = Reminder::with_id(
            "1",
            "Insulin",
            "1",
            "08:30 PM".parse::<ReminderTime>().unwrap(),
            Some(Slot::Two),
        );
        let req = DispenserRequest::from_reminder(&reminder);
        assert_eq!(req.hour, 20);
        assert_eq!(req.minute, 30);
        assert_eq!(req.slot, Slot::Two);

        let midnight = Reminder::with_id(
            "2",
            "Aspirin",
            "1",
            "12:00 AM".parse::<ReminderTime>().unwrap(),
            None,
        );
        let req = DispenserRequest::from_reminder(&midnight);
        assert_eq!(req.hour, 0);
        assert_eq!(req.slot, Slot::One);
    }

    #[test]
    fn test_url() {
        let req = DispenserRequest {
            name: "Vitamin C".to_string(),
            slot: Slot::Two,
            hour: 7,
            minute: 5,
        };

        let url = req.url("192.168.241.163").unwrap();
        assert_eq!(
            url.as_str(),
            "http://192.168.241.163/update?name=Vitamin+C&slot=2&hour=7&minute=5"
        );

        let url = req.url("http://dispenser.local:8080/").unwrap();
        assert_eq!(url.host_str(), Some("dispenser.local"));
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.path(), "/update");
    }

    #[test]
    fn test_url_escapes_name() {
        let req = DispenserRequest {
            name: "A&B=C".to_string(),
            slot: Slot::One,
            hour: 9,
            minute: 0,
        };
        let url = req.url("10.0.0.2").unwrap();
        assert_eq!(url.query(), Some("name=A%26B%3DC&slot=1&hour=9&minute=0"));
    }

    #[test]
    fn test_invalid_address() {
        let req = DispenserRequest {
            name: "Aspirin".to_string(),
            slot: Slot::One,
            hour: 9,
            minute: 0,
        };
        assert!(req.url("http://").is_err());
    }
}
