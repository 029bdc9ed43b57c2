//! Sink trait for log output destinations

use super::{entry::Entry, error::Result};

/// Destination for dispatched entries.
///
/// Sinks are owned by the logger and only touched by its worker thread once
/// registered, so implementations need `Send` but not `Sync`. Errors are
/// reported by the worker and never stop delivery to the other sinks.
pub trait Sink: Send {
    fn write(&mut self, entry: &Entry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
