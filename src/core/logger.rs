//! Main logger implementation

use super::{
    config::PipelineConfig,
    entry::Entry,
    error::{LoggerError, Result},
    format,
    metrics::PipelineMetrics,
    queue::{EntryQueue, DEFAULT_MAX_QUEUE_SIZE},
    scope::ScopeTimer,
    severity::Severity,
    sink::Sink,
    worker::{self, Shared, WorkerState, WORKER_THREAD_NAME},
};
use parking_lot::Mutex;
use std::fmt::Display;
use std::sync::Arc;
use std::thread;

/// The log pipeline.
///
/// Producers call [`log`](Logger::log) from any thread; a single background
/// worker, started lazily on first use, delivers entries to the registered
/// sinks. The logger is shared by reference (or inside an `Arc`) and shut
/// down once, either explicitly with [`shutdown`](Logger::shutdown) or when
/// it is dropped. Shutdown delivers every entry still queued.
///
/// # Example
///
/// ```
/// use logpipe::prelude::*;
///
/// let logger = Logger::builder()
///     .min_severity(Severity::Info)
///     .max_queue_size(1_000)
///     .build()?;
///
/// logger.info("service started");
/// logger.debug("filtered out");
/// logger.shutdown()?;
/// # Ok::<(), logpipe::LoggerError>(())
/// ```
pub struct Logger {
    shared: Arc<Shared>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl Logger {
    /// Logger with the default configuration and no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(EntryQueue::default(), Severity::Debug)
    }

    /// Build a logger, and the sinks it describes, from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when the configuration does not validate.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let logger = Self::with_parts(
            EntryQueue::with_capacity(config.max_queue_size)?,
            config.min_severity,
        );
        for sink in config.build_sinks()? {
            logger.add_sink(sink);
        }
        Ok(logger)
    }

    fn with_parts(queue: EntryQueue, min_severity: Severity) -> Self {
        Self {
            shared: Arc::new(Shared::new(queue, min_severity)),
            worker: Mutex::new(None),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Change the minimum severity for subsequent calls.
    ///
    /// The threshold is read without synchronizing against other producers:
    /// calls already in flight on other threads may still observe the old
    /// value.
    pub fn set_minimum_severity(&self, severity: Severity) {
        self.shared.set_min_severity(severity);
    }

    pub fn minimum_severity(&self) -> Severity {
        self.shared.min_severity()
    }

    /// Whether a call at `severity` would currently pass the filter.
    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.shared.min_severity()
    }

    /// Register a sink. Dispatch follows registration order.
    pub fn add_sink(&self, sink: Box<dyn Sink>) {
        self.ensure_started();
        self.shared.sinks.lock().push(sink);
    }

    /// Drop every registered sink.
    pub fn clear_sinks(&self) {
        self.ensure_started();
        self.shared.sinks.lock().clear();
    }

    pub fn sink_count(&self) -> usize {
        self.shared.sinks.lock().len()
    }

    /// Change the eviction threshold. Takes effect on the next enqueue.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when `size` is zero.
    pub fn set_max_queue_size(&self, size: usize) -> Result<()> {
        self.shared.inbox.lock().entries.set_capacity(size)
    }

    pub fn max_queue_size(&self) -> usize {
        self.shared.inbox.lock().entries.capacity()
    }

    /// Submit a message. Never blocks on sink I/O and never fails: when the
    /// queue is full the oldest queued entry is evicted to make room.
    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        if !self.is_enabled(severity) {
            return;
        }

        self.ensure_started();
        self.enqueue(Entry::new(severity, message));
    }

    /// [`log`](Logger::log) only when `condition` holds.
    #[inline]
    pub fn log_if(&self, condition: bool, severity: Severity, message: impl Into<String>) {
        if condition {
            self.log(severity, message);
        }
    }

    /// Log a runtime template, replacing each `{}` with the next argument.
    ///
    /// No substitution work happens for filtered severities.
    pub fn log_template(&self, severity: Severity, template: &str, args: &[&dyn Display]) {
        if !self.is_enabled(severity) {
            return;
        }
        self.log(severity, format::substitute(template, args));
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Severity::Fatal, message);
    }

    /// Time a scope: logs on entry and again, with the elapsed time, when
    /// the returned guard is dropped.
    pub fn scope(&self, name: impl Into<String>, severity: Severity) -> ScopeTimer<'_> {
        ScopeTimer::new(self, name, severity)
    }

    /// Number of entries waiting for the worker
    pub fn pending(&self) -> usize {
        self.shared.inbox.lock().entries.len()
    }

    pub fn state(&self) -> WorkerState {
        self.shared.lifecycle.load()
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.shared.metrics
    }

    fn enqueue(&self, entry: Entry) {
        {
            let mut inbox = self.shared.inbox.lock();
            if inbox.closed {
                // Shut down and drained; nothing would deliver this entry
                self.shared.metrics.record_rejected();
                return;
            }
            let evicted = inbox.entries.push(entry);
            if evicted > 0 {
                self.shared.metrics.record_evicted(evicted);
            }
            self.shared.metrics.record_enqueued();
        }
        self.shared.ready.notify_one();
    }

    /// Spawn the worker exactly once, whichever thread gets here first.
    fn ensure_started(&self) {
        loop {
            match self.shared.lifecycle.load() {
                WorkerState::Running | WorkerState::Stopping | WorkerState::Stopped => return,
                WorkerState::Starting => thread::yield_now(),
                WorkerState::Uninitialized => {
                    if self
                        .shared
                        .lifecycle
                        .transition(WorkerState::Uninitialized, WorkerState::Starting)
                    {
                        self.spawn_worker();
                        return;
                    }
                }
            }
        }
    }

    fn spawn_worker(&self) {
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker::run(&shared));

        match spawned {
            Ok(handle) => {
                *self.worker.lock() = Some(handle);
                self.shared.metrics.record_worker_start();
                self.shared.lifecycle.store(WorkerState::Running);
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to spawn log worker thread: {}", e);
                self.shared.lifecycle.store(WorkerState::Uninitialized);
            }
        }
    }

    /// Stop the worker after it has delivered every queued entry.
    ///
    /// Blocks until the worker has drained and joined. Calling it again, or
    /// from several threads, is harmless: every caller returns once the
    /// pipeline is stopped. Entries logged afterwards are discarded.
    ///
    /// # Errors
    ///
    /// Returns `WorkerPanicked` if the worker thread panicked.
    pub fn shutdown(&self) -> Result<()> {
        loop {
            match self.shared.lifecycle.load() {
                WorkerState::Stopped => return Ok(()),
                WorkerState::Starting | WorkerState::Stopping => thread::yield_now(),
                WorkerState::Uninitialized => {
                    if self
                        .shared
                        .lifecycle
                        .transition(WorkerState::Uninitialized, WorkerState::Stopping)
                    {
                        // Never started: deliver leftovers on this thread
                        worker::final_drain(&self.shared);
                        self.shared.lifecycle.store(WorkerState::Stopped);
                        return Ok(());
                    }
                }
                WorkerState::Running => {
                    if self
                        .shared
                        .lifecycle
                        .transition(WorkerState::Running, WorkerState::Stopping)
                    {
                        break;
                    }
                }
            }
        }

        self.shared.inbox.lock().stop_requested = true;
        self.shared.ready.notify_all();

        let handle = self.worker.lock().take();
        let result = match handle {
            Some(handle) => handle
                .join()
                .map_err(|payload| LoggerError::WorkerPanicked(worker::panic_message(payload.as_ref()))),
            None => Ok(()),
        };

        self.shared.lifecycle.store(WorkerState::Stopped);
        result
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            eprintln!("[LOGGER ERROR] Log worker failed during shutdown: {}", e);
        }

        let evicted = self.shared.metrics.evicted();
        if evicted > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} evicted entries (eviction rate: {:.2}%)",
                evicted,
                self.shared.metrics.eviction_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logpipe::prelude::*;
///
/// let logger = Logger::builder()
///     .min_severity(Severity::Debug)
///     .max_queue_size(500)
///     .sink(ConsoleSink::with_colors(false))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    min_severity: Severity,
    max_queue_size: usize,
    sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_severity: Severity::Debug,
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_queue_size(mut self, size: usize) -> Self {
        self.max_queue_size = size;
        self
    }

    /// Add a sink; sinks receive entries in the order they were added
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when the queue size is zero.
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::with_parts(
            EntryQueue::with_capacity(self.max_queue_size)?,
            self.min_severity,
        );
        for sink in self.sinks {
            logger.add_sink(sink);
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
