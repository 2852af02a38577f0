use std::sync::Arc;

use pill_types::Reminder;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a reminder with id {0} already exists")]
    DuplicateId(String),
}

type Snapshot = Arc<[Reminder]>;

/// In-memory reminder list.
///
/// The store is the only writer. Every change publishes a new immutable
/// snapshot, so readers holding a [`StoreWatcher`] never see a partial update.
/// Order is insertion order. Nothing is persisted.
#[derive(Debug)]
pub struct ReminderStore {
    tx: watch::Sender<Snapshot>,
}

impl ReminderStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Snapshot::from(Vec::new()));
        Self { tx }
    }

    /// Appends a reminder. Ids must be unique; a duplicate is rejected and
    /// the list is left untouched.
    pub fn add(&self, reminder: Reminder) -> Result<(), StoreError> {
        let mut result = Ok(());
        self.tx.send_if_modified(|list| {
            if list.iter().any(|r| r.id == reminder.id) {
                result = Err(StoreError::DuplicateId(reminder.id.clone()));
                return false;
            }
            let mut next = Vec::with_capacity(list.len() + 1);
            next.extend(list.iter().cloned());
            next.push(reminder);
            *list = next.into();
            true
        });

        match &result {
            Ok(()) => tracing::debug!("Added reminder, {} total", self.len()),
            Err(e) => tracing::warn!("Rejected reminder: {}", e),
        }
        result
    }

    /// Removes the first reminder with the given id and returns it.
    /// Unknown ids are a no-op.
    pub fn remove(&self, id: &str) -> Option<Reminder> {
        let mut removed = None;
        self.tx.send_if_modified(|list| {
            let Some(pos) = list.iter().position(|r| r.id == id) else {
                return false;
            };
            let mut next = list.to_vec();
            removed = Some(next.remove(pos));
            *list = next.into();
            true
        });

        if removed.is_some() {
            tracing::debug!("Removed reminder {}", id);
        }
        removed
    }

    /// Current list in insertion order
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<Reminder> {
        self.tx.borrow().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only handle that observes every new snapshot
    pub fn subscribe(&self) -> StoreWatcher {
        StoreWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ReminderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct StoreWatcher {
    rx: watch::Receiver<Snapshot>,
}

impl StoreWatcher {
    pub fn snapshot(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next change. Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
