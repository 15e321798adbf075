//! Cancellable one-shot deadlines. Arming always replaces, so an encounter can
//! never hold two pending timers of the same kind.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneShot {
    due: Option<Timestamp>,
}

impl OneShot {
    pub const fn idle() -> Self {
        Self { due: None }
    }

    pub fn arm(&mut self, now: Timestamp, delay: Duration) -> Timestamp {
        let due = now.saturating_add(delay);
        self.due = Some(due);
        due
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn due(&self) -> Option<Timestamp> {
        self.due
    }

    pub fn remaining(&self, now: Timestamp) -> Option<Duration> {
        self.due.map(|due| due.remaining_from(now))
    }

    /// Disarm and report `true` if the deadline has been reached.
    pub fn fire_if_due(&mut self, now: Timestamp) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
