//! Bounded decision log.
//!
//! The log keeps the newest decision at index 0. When it is full, recording a
//! new decision evicts the oldest one first, so the length never exceeds the
//! capacity. Apart from [`HistoryLog::clear`] nothing is ever removed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::Decision;

/// Default number of decisions kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Most-recent-first log of decisions with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    records: VecDeque<Decision>,
    capacity: usize,
}

impl HistoryLog {
    /// Creates an empty log holding up to [`DEFAULT_HISTORY_LIMIT`] decisions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }

    /// Creates an empty log with a custom capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a log from records already ordered most-recent-first.
    ///
    /// Records beyond `capacity` are the oldest and are discarded.
    #[must_use]
    pub fn from_records(records: Vec<Decision>, capacity: usize) -> Self {
        let mut log = Self::with_capacity(capacity);
        log.records.extend(records.into_iter().take(log.capacity));
        log
    }

    /// Records a decision at the front, returning the evicted decision if the
    /// log was full.
    pub fn record(&mut self, decision: Decision) -> Option<Decision> {
        let evicted = if self.records.len() >= self.capacity {
            self.records.pop_back()
        } else {
            None
        };
        self.records.push_front(decision);
        evicted
    }

    /// Removes every decision.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recent decision, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Decision> {
        self.records.front()
    }

    /// Iterates newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Decision> + ExactSizeIterator {
        self.records.iter()
    }

    /// Copies the records out, newest first.
    #[must_use]
    pub fn to_records(&self) -> Vec<Decision> {
        self.records.iter().cloned().collect()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a Decision;
    type IntoIter = std::collections::vec_deque::Iter<'a, Decision>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A history log shared between writers.
///
/// Each operation takes the lock for its full duration, so the
/// length check, eviction and insert in [`SharedHistory::record`] happen as
/// one step.
#[derive(Debug, Clone, Default)]
pub struct SharedHistory {
    inner: Arc<Mutex<HistoryLog>>,
}

impl SharedHistory {
    #[must_use]
    pub fn new(log: HistoryLog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(log)),
        }
    }

    /// Records a decision, returning the evicted decision if any.
    pub fn record(&self, decision: Decision) -> Option<Decision> {
        self.with_log(|log| log.record(decision))
    }

    pub fn clear(&self) {
        self.with_log(HistoryLog::clear);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.with_log(|log| log.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.with_log(|log| log.is_empty())
    }

    /// Returns a copy of the current log.
    #[must_use]
    pub fn snapshot(&self) -> HistoryLog {
        self.with_log(|log| log.clone())
    }

    fn with_log<T>(&self, f: impl FnOnce(&mut HistoryLog) -> T) -> T {
        // A panic elsewhere cannot leave the log half-updated, so a poisoned
        // lock still guards a consistent value.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}
