//! Log entry structure

use super::severity::Severity;
use chrono::{DateTime, Local};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::thread::{self, ThreadId};

/// Opaque identifier of the thread that produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProducerId(ThreadId);

impl ProducerId {
    /// Identifier of the calling thread
    pub fn current() -> Self {
        ProducerId(thread::current().id())
    }

    /// Numeric hash used by the file line format. Stable for the lifetime
    /// of the process.
    pub fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// One accepted log call. Entries are never mutated after construction;
/// the message is already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    timestamp: DateTime<Local>,
    severity: Severity,
    producer: ProducerId,
    message: String,
}

impl Entry {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self::at(Local::now(), severity, ProducerId::current(), message)
    }

    pub fn at(
        timestamp: DateTime<Local>,
        severity: Severity,
        producer: ProducerId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            severity,
            producer,
            message: message.into(),
        }
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn producer(&self) -> ProducerId {
        self.producer
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
