use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::time::ReminderTime;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid dispenser slot: {0:?} (expected \"1\" or \"2\")")]
pub struct SlotError(pub String);

/// Physical compartment of the pill dispenser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::One, Slot::Two];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::One => "1",
            Slot::Two => "2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Slot::One),
            "2" => Ok(Slot::Two),
            other => Err(SlotError(other.to_string())),
        }
    }
}

/// A scheduled medication entry.
///
/// Reminders are never edited in place; to change one, remove it and add a
/// new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub time: ReminderTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<Slot>,
}

impl Reminder {
    /// Creates a reminder with a fresh random id.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        time: ReminderTime,
        slot: Option<Slot>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, dosage, time, slot)
    }

    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        dosage: impl Into<String>,
        time: ReminderTime,
        slot: Option<Slot>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dosage: dosage.into(),
            time,
            slot,
        }
    }
}

/// Event raised when a reminder's time of day comes round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueReminder {
    pub id: String,
    pub name: String,
    pub time: ReminderTime,
    pub slot: Option<Slot>,
}

impl From<&Reminder> for DueReminder {
    fn from(reminder: &Reminder) -> Self {
        Self {
            id: reminder.id.clone(),
            name: reminder.name.clone(),
            time: reminder.time,
            slot: reminder.slot,
        }
    }
}
