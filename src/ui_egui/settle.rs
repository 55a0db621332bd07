//! Short highlight after a card lands somewhere new.
//!
//! Each entry gets at most one pending deadline. Triggering again restarts
//! it; the host polls once per frame and repaints until nothing is pending.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SettleScheduler {
    duration: Duration,
    pending: HashMap<i64, Instant>,
}

impl SettleScheduler {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            pending: HashMap::new(),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start (or restart) the settle period for an entry.
    pub fn trigger(&mut self, entry_id: i64, now: Instant) {
        self.pending.insert(entry_id, now + self.duration);
    }

    pub fn cancel(&mut self, entry_id: i64) -> bool {
        self.pending.remove(&entry_id).is_some()
    }

    pub fn is_settling(&self, entry_id: i64, now: Instant) -> bool {
        self.pending
            .get(&entry_id)
            .map_or(false, |deadline| now < *deadline)
    }

    /// Remove and return every entry whose deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Vec<i64> {
        let mut elapsed: Vec<i64> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, _)| *id)
            .collect();
        elapsed.sort_unstable();
        for id in &elapsed {
            self.pending.remove(id);
        }
        elapsed
    }

    /// Earliest pending deadline, for scheduling the next repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for SettleScheduler {
    fn default() -> Self {
        Self::from_millis(crate::models::settings::DEFAULT_SETTLE_MILLIS)
    }
}
