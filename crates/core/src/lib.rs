//! Pill Core - reminder state and due-time checks
//!
//! - [`ReminderStore`] owns the in-memory reminder list for one session
//! - [`Notifier`] polls the wall clock and reports reminders that are due
//! - [`MedicineCatalog`] validates user input before it reaches the store

mod catalog;
mod clock;
mod notifier;
mod store;

pub use catalog::{Medicine, MedicineCatalog, ReminderDraft, ValidationError};
pub use clock::{Clock, FixedClock, SystemClock};
pub use notifier::{due_at, Notifier, NotifierHandle, DEFAULT_POLL_INTERVAL};
pub use store::{ReminderStore, StoreError, StoreWatcher};
