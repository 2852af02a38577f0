use once_cell::sync::Lazy;
use pill_types::{Meridiem, Reminder, ReminderTime, Slot, TimeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields ({0} is empty)")]
    MissingField(&'static str),

    #[error("There was a problem with the time selection. Please try again.")]
    MissingTime,

    #[error("Invalid medicine name {0:?}. Please enter a valid medicine.")]
    UnknownMedicine(String),

    #[error("Invalid dosage. The recommended dosage for {name} is between {min} and {max} tablets.")]
    DosageOutOfRange { name: String, min: f64, max: f64 },

    #[error(transparent)]
    Time(#[from] TimeError),
}

/// A known medicine and its recommended dosage range, in tablets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub min_dosage: f64,
    pub max_dosage: f64,
}

impl Medicine {
    pub fn new(name: impl Into<String>, min_dosage: f64, max_dosage: f64) -> Self {
        Self {
            name: name.into(),
            min_dosage,
            max_dosage,
        }
    }

    pub fn accepts(&self, dosage: f64) -> bool {
        dosage >= self.min_dosage && dosage <= self.max_dosage
    }
}

const BUILTIN_MEDICINES: &[(&str, f64, f64)] = &[
    ("Paracetamol", 1.0, 2.0),
    ("Vitamin C", 1.0, 1.0),
    ("Ibuprofen", 1.0, 3.0),
    ("Metformin", 1.0, 2.0),
    ("Glibenclamide", 1.0, 2.0),
    ("Aspirin", 1.0, 2.0),
    ("Atorvastatin", 1.0, 1.0),
    ("Losartan", 1.0, 1.0),
    ("Amlodipine", 1.0, 1.0),
    ("Omeprazole", 1.0, 1.0),
    ("Pantoprazole", 1.0, 1.0),
    ("Cetirizine", 1.0, 1.0),
    ("Loratadine", 1.0, 1.0),
    ("Amoxicillin", 1.0, 3.0),
    ("Azithromycin", 1.0, 1.0),
    ("Salbutamol", 1.0, 2.0),
    ("Montelukast", 1.0, 1.0),
    ("Clopidogrel", 1.0, 1.0),
    ("Warfarin", 1.0, 1.0),
    ("Levothyroxine", 1.0, 1.0),
    ("Insulin", 1.0, 2.0),
];

static BUILTIN: Lazy<MedicineCatalog> = Lazy::new(|| {
    MedicineCatalog::from_entries(
        BUILTIN_MEDICINES
            .iter()
            .map(|(name, min, max)| Medicine::new(*name, *min, *max)),
    )
});

/// Static medicine/dosage table used to check input before a reminder is built
#[derive(Debug, Clone, Default)]
pub struct MedicineCatalog {
    medicines: Vec<Medicine>,
}

impl MedicineCatalog {
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Medicine>) -> Self {
        let mut catalog = Self::default();
        catalog.extend(entries);
        catalog
    }

    /// Adds entries; a name already present (ignoring case) is replaced.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = Medicine>) {
        for entry in entries {
            match self
                .medicines
                .iter_mut()
                .find(|m| m.name.eq_ignore_ascii_case(&entry.name))
            {
                Some(existing) => *existing = entry,
                None => self.medicines.push(entry),
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&Medicine> {
        let name = name.trim();
        self.medicines
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Medicine> {
        self.medicines.iter()
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Checks a medicine name and dosage against the table.
    ///
    /// The dosage is read from its leading number, so `"2 tablets"` counts as 2.
    pub fn validate(&self, name: &str, dosage: &str) -> Result<&Medicine, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if dosage.trim().is_empty() {
            return Err(ValidationError::MissingField("dosage"));
        }

        let medicine = self
            .find(name)
            .ok_or_else(|| ValidationError::UnknownMedicine(name.trim().to_string()))?;

        match leading_number(dosage) {
            Some(value) if medicine.accepts(value) => Ok(medicine),
            _ => Err(ValidationError::DosageOutOfRange {
                name: medicine.name.clone(),
                min: medicine.min_dosage,
                max: medicine.max_dosage,
            }),
        }
    }
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut seen_dot = false;
    let end = s
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Raw form input for a new reminder
#[derive(Debug, Clone, Default)]
pub struct ReminderDraft {
    pub name: String,
    pub dosage: String,
    pub hour12: Option<u32>,
    pub minute: Option<u32>,
    pub meridiem: Option<Meridiem>,
    pub slot: Option<Slot>,
}

impl ReminderDraft {
    /// Validates the draft and builds a reminder with a fresh id.
    pub fn into_reminder(self, catalog: &MedicineCatalog) -> Result<Reminder, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.dosage.trim().is_empty() {
            return Err(ValidationError::MissingField("dosage"));
        }
        let (Some(hour12), Some(minute), Some(meridiem)) = (self.hour12, self.minute, self.meridiem)
        else {
            return Err(ValidationError::MissingTime);
        };

        catalog.validate(&self.name, &self.dosage)?;
        let time = ReminderTime::from_12h(hour12, minute, meridiem)?;

        Ok(Reminder::new(
            self.name.trim(),
            self.dosage.trim(),
            time,
            self.slot,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, dosage: &str) -> ReminderDraft {
        ReminderDraft {
            name: name.to_string(),
            dosage: dosage.to_string(),
            hour12: Some(8),
            minute: Some(5),
            meridiem: Some(Meridiem::Am),
            slot: Some(Slot::One),
        }
    }

    #[test]
    fn test_builtin_table() {
        let catalog = MedicineCatalog::builtin();
        assert_eq!(catalog.len(), 21);

        let ibuprofen = catalog.find("  ibuprofen ").unwrap();
        assert_eq!(ibuprofen.name, "Ibuprofen");
        assert_eq!(ibuprofen.max_dosage, 3.0);
        assert!(catalog.find("Unobtainium").is_none());
    }

    #[test]
    fn test_validate_dosage_range() {
        let catalog = MedicineCatalog::builtin();

        assert!(catalog.validate("Aspirin", "1").is_ok());
        assert!(catalog.validate("Aspirin", "2 tablets").is_ok());
        assert!(catalog.validate("Aspirin", "1.5").is_ok());

        let err = catalog.validate("aspirin", "3").unwrap_err();
        assert_eq!(
            err,
            ValidationError::DosageOutOfRange {
                name: "Aspirin".to_string(),
                min: 1.0,
                max: 2.0,
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid dosage. The recommended dosage for Aspirin is between 1 and 2 tablets."
        );

        assert!(matches!(
            catalog.validate("Aspirin", "one"),
            Err(ValidationError::DosageOutOfRange { .. })
        ));
        assert!(matches!(
            catalog.validate("Aspirin", "0"),
            Err(ValidationError::DosageOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_and_empty() {
        let catalog = MedicineCatalog::builtin();
        assert_eq!(
            catalog.validate("Unobtainium", "1").unwrap_err(),
            ValidationError::UnknownMedicine("Unobtainium".to_string())
        );
        assert_eq!(
            catalog.validate("  ", "1").unwrap_err(),
            ValidationError::MissingField("name")
        );
        assert_eq!(
            catalog.validate("Aspirin", "").unwrap_err(),
            ValidationError::MissingField("dosage")
        );
    }

    #[test]
    fn test_extend_replaces_by_name() {
        let mut catalog = MedicineCatalog::builtin();
        catalog.extend([
            Medicine::new("ASPIRIN", 1.0, 4.0),
            Medicine::new("Melatonin", 1.0, 1.0),
        ]);
        assert_eq!(catalog.len(), 22);
        assert!(catalog.validate("Aspirin", "4").is_ok());
        assert!(catalog.validate("melatonin", "1").is_ok());
    }

    #[test]
    fn test_draft_into_reminder() {
        let catalog = MedicineCatalog::builtin();
        let reminder = draft(" Aspirin ", "1").into_reminder(&catalog).unwrap();
        assert_eq!(reminder.name, "Aspirin");
        assert_eq!(reminder.time.to_string(), "08:05 AM");
        assert_eq!(reminder.slot, Some(Slot::One));
        assert!(!reminder.id.is_empty());
    }

    #[test]
    fn test_draft_missing_time() {
        let catalog = MedicineCatalog::builtin();
        let mut d = draft("Aspirin", "1");
        d.meridiem = None;
        assert_eq!(
            d.into_reminder(&catalog).unwrap_err(),
            ValidationError::MissingTime
        );

        let mut d = draft("Aspirin", "1");
        d.minute = Some(60);
        assert_eq!(
            d.into_reminder(&catalog).unwrap_err(),
            ValidationError::Time(TimeError::Minute(60))
        );
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("2"), Some(2.0));
        assert_eq!(leading_number(" 1.5 tablets"), Some(1.5));
        assert_eq!(leading_number("1.2.3"), Some(1.2));
        assert_eq!(leading_number("tablet"), None);
        assert_eq!(leading_number(""), None);
    }
}
