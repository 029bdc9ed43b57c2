//! Bounded entry queue with oldest-first eviction
//!
//! The queue itself is not synchronized; the logger keeps it behind a mutex
//! shared with the worker.

use super::entry::Entry;
use super::error::{LoggerError, Result};
use std::collections::VecDeque;

/// Default maximum number of buffered entries
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 10_000;

#[derive(Debug)]
pub struct EntryQueue {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl EntryQueue {
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        validate_capacity(capacity)?;
        Ok(Self {
            entries: VecDeque::new(),
            capacity,
        })
    }

    /// Append an entry, evicting from the head until there is room.
    ///
    /// Returns how many entries were evicted.
    pub fn push(&mut self, entry: Entry) -> usize {
        let mut evicted = 0;
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        self.entries.push_back(entry);
        evicted
    }

    /// Remove up to `max` entries from the head, preserving order.
    pub fn drain_batch(&mut self, max: usize) -> Vec<Entry> {
        let count = max.min(self.entries.len());
        self.entries.drain(..count).collect()
    }

    pub fn drain_all(&mut self) -> Vec<Entry> {
        self.entries.drain(..).collect()
    }

    /// Change the eviction threshold. Existing entries are kept; the next
    /// [`push`](Self::push) trims the queue down to the new capacity.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

impl Default for EntryQueue {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: DEFAULT_MAX_QUEUE_SIZE,
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(LoggerError::config(
            "EntryQueue",
            "max queue size must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::severity::Severity;

    fn messages(queue: &EntryQueue) -> Vec<&str> {
        queue.iter().map(Entry::message).collect()
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut queue = EntryQueue::with_capacity(3).unwrap();
        let mut evicted = 0;
        for msg in ["A", "B", "C", "D"] {
            evicted += queue.push(Entry::new(Severity::Info, msg));
        }
        assert_eq!(evicted, 1);
        assert_eq!(messages(&queue), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_drain_batch_preserves_order() {
        let mut queue = EntryQueue::default();
        for i in 0..5 {
            queue.push(Entry::new(Severity::Debug, format!("m{}", i)));
        }

        let batch = queue.drain_batch(3);
        let batch: Vec<&str> = batch.iter().map(Entry::message).collect();
        assert_eq!(batch, vec!["m0", "m1", "m2"]);
        assert_eq!(messages(&queue), vec!["m3", "m4"]);

        assert_eq!(queue.drain_batch(100).len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_shrinking_capacity_applies_on_next_push() {
        let mut queue = EntryQueue::with_capacity(5).unwrap();
        for msg in ["a", "b", "c", "d", "e"] {
            queue.push(Entry::new(Severity::Info, msg));
        }

        queue.set_capacity(2).unwrap();
        assert_eq!(queue.len(), 5);

        let evicted = queue.push(Entry::new(Severity::Info, "f"));
        assert_eq!(evicted, 4);
        assert_eq!(messages(&queue), vec!["e", "f"]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(EntryQueue::with_capacity(0).is_err());
        let mut queue = EntryQueue::default();
        assert!(queue.set_capacity(0).is_err());
        assert_eq!(queue.capacity(), DEFAULT_MAX_QUEUE_SIZE);
    }
}
