use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("hour out of range: {0}")]
    Hour(u32),

    #[error("minute out of range: {0}")]
    Minute(u32),

    #[error("invalid time of day: {0:?} (expected e.g. \"08:05 AM\" or \"20:05\")")]
    Format(String),
}

/// AM / PM half of a 12-hour clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meridiem {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            _ => Err(TimeError::Format(s.to_string())),
        }
    }
}

/// Time of day at minute resolution, without a date.
///
/// Stored as a 24-hour `(hour, minute)` pair and compared numerically.
/// `Display` renders the 12-hour form shown to users, e.g. `08:05 AM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    /// 24-hour constructor
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::Hour(hour));
        }
        if minute > 59 {
            return Err(TimeError::Minute(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Builds a time from a 12-hour selection (hour 1-12).
    pub fn from_12h(hour12: u32, minute: u32, meridiem: Meridiem) -> Result<Self, TimeError> {
        if !(1..=12).contains(&hour12) {
            return Err(TimeError::Hour(hour12));
        }
        let hour = match meridiem {
            Meridiem::Am => hour12 % 12,
            Meridiem::Pm => hour12 % 12 + 12,
        };
        Self::new(hour, minute)
    }

    /// Truncates a wall-clock reading to the minute.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Hour on the 24-hour clock (0-23)
    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// Hour on the 12-hour clock (1-12)
    pub fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h as u32,
        }
    }

    pub fn meridiem(&self) -> Meridiem {
        if self.hour < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} {}",
            self.hour12(),
            self.minute,
            self.meridiem()
        )
    }
}

impl FromStr for ReminderTime {
    type Err = TimeError;

    /// Accepts `8:05 AM`, `08:05 pm` or 24-hour `20:05`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || TimeError::Format(s.to_string());
        let trimmed = s.trim();

        let (clock, meridiem) = match trimmed.rsplit_once(char::is_whitespace) {
            Some((clock, suffix)) => (clock.trim(), Some(suffix.parse::<Meridiem>()?)),
            None => (trimmed, None),
        };

        let (h, m) = clock.split_once(':').ok_or_else(format_err)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(format_err());
        }
        let hour: u32 = h.parse().map_err(|_| format_err())?;
        let minute: u32 = m.parse().map_err(|_| format_err())?;

        match meridiem {
            Some(meridiem) => Self::from_12h(hour, minute, meridiem),
            None => Self::new(hour, minute),
        }
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}
