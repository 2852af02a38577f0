//! Pill Types - shared reminder types
//!
//! Plain value types used by the store, the notifier and the dispenser link.
//! This crate carries no runtime or I/O dependencies.

mod reminder;
mod time;

pub use reminder::{DueReminder, Reminder, Slot, SlotError};
pub use time::{Meridiem, ReminderTime, TimeError};
