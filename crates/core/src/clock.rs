use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{Local, NaiveTime, Timelike};

/// Source of the current local time of day
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Manually driven clock, whole seconds only
#[derive(Debug)]
pub struct FixedClock {
    secs: AtomicU32,
}

impl FixedClock {
    pub fn new(time: NaiveTime) -> Self {
        Self {
            secs: AtomicU32::new(time.num_seconds_from_midnight()),
        }
    }

    pub fn set(&self, time: NaiveTime) {
        self.secs
            .store(time.num_seconds_from_midnight(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        let secs = self.secs.load(Ordering::SeqCst);
        NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or_default()
    }
}
