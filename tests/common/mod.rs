//! Shared sinks for integration tests

#![allow(dead_code)]

use logpipe::{Entry, LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every entry it receives; clones share the same record.
#[derive(Clone, Default)]
pub struct CaptureSink {
    entries: Arc<Mutex<Vec<Entry>>>,
    flushes: Arc<Mutex<usize>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.message().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.lock()
    }
}

impl Sink for CaptureSink {
    fn write(&mut self, entry: &Entry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        *self.flushes.lock() += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

/// Fails every write with an error
pub struct FailingSink;

impl Sink for FailingSink {
    fn write(&mut self, _entry: &Entry) -> Result<()> {
        Err(LoggerError::sink("disk on fire"))
    }

    fn flush(&mut self) -> Result<()> {
        Err(LoggerError::sink("still on fire"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Panics on every write
pub struct PanickingSink;

impl Sink for PanickingSink {
    fn write(&mut self, _entry: &Entry) -> Result<()> {
        panic!("sink exploded");
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "panicking"
    }
}
