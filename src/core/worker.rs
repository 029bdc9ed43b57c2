//! Background delivery worker
//!
//! One thread per logger drains the queue in batches and fans each entry out
//! to every registered sink. The queue lock is released before any sink I/O,
//! so producers never wait on a slow sink.

use super::{
    entry::Entry, metrics::PipelineMetrics, queue::EntryQueue, severity::Severity, sink::Sink,
};
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of entries dispatched per wake-up
pub const BATCH_SIZE: usize = 100;

/// Name given to the spawned worker thread
pub const WORKER_THREAD_NAME: &str = "logpipe-worker";

/// Lifecycle of a logger's worker thread.
///
/// `Uninitialized -> Starting -> Running -> Stopping -> Stopped`. A logger
/// that is shut down before its first use goes straight from
/// `Uninitialized` to `Stopped`, and a failed spawn falls back from
/// `Starting` to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    Uninitialized = 0,
    Starting = 1,
    Running = 2,
    Stopping = 3,
    Stopped = 4,
}

impl WorkerState {
    fn from_repr(value: u8) -> Self {
        match value {
            0 => WorkerState::Uninitialized,
            1 => WorkerState::Starting,
            2 => WorkerState::Running,
            3 => WorkerState::Stopping,
            _ => WorkerState::Stopped,
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Uninitialized => "Uninitialized",
            WorkerState::Starting => "Starting",
            WorkerState::Running => "Running",
            WorkerState::Stopping => "Stopping",
            WorkerState::Stopped => "Stopped",
        };
        f.write_str(name)
    }
}

/// Atomic holder for [`WorkerState`]
#[derive(Debug)]
pub(crate) struct Lifecycle(AtomicU8);

impl Lifecycle {
    pub(crate) const fn new() -> Self {
        Lifecycle(AtomicU8::new(WorkerState::Uninitialized as u8))
    }

    pub(crate) fn load(&self) -> WorkerState {
        WorkerState::from_repr(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: WorkerState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Compare-and-swap; only one caller wins a given transition.
    pub(crate) fn transition(&self, from: WorkerState, to: WorkerState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Queue plus the flags the worker waits on, guarded by one mutex.
#[derive(Debug)]
pub(crate) struct Inbox {
    pub(crate) entries: EntryQueue,
    pub(crate) stop_requested: bool,
    /// Set by the final drain; later enqueues are refused.
    pub(crate) closed: bool,
}

impl Inbox {
    pub(crate) fn new(entries: EntryQueue) -> Self {
        Self {
            entries,
            stop_requested: false,
            closed: false,
        }
    }
}

/// State shared between the logger handle and its worker thread.
pub(crate) struct Shared {
    pub(crate) inbox: Mutex<Inbox>,
    pub(crate) ready: Condvar,
    pub(crate) sinks: Mutex<Vec<Box<dyn Sink>>>,
    /// Relaxed: a level change races freely with in-flight log calls.
    pub(crate) min_severity: AtomicU8,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) metrics: PipelineMetrics,
}

impl Shared {
    pub(crate) fn new(entries: EntryQueue, min_severity: Severity) -> Self {
        Self {
            inbox: Mutex::new(Inbox::new(entries)),
            ready: Condvar::new(),
            sinks: Mutex::new(Vec::new()),
            min_severity: AtomicU8::new(min_severity as u8),
            lifecycle: Lifecycle::new(),
            metrics: PipelineMetrics::new(),
        }
    }

    pub(crate) fn min_severity(&self) -> Severity {
        Severity::from_repr(self.min_severity.load(Ordering::Relaxed)).unwrap_or(Severity::Debug)
    }

    pub(crate) fn set_min_severity(&self, severity: Severity) {
        self.min_severity.store(severity as u8, Ordering::Relaxed);
    }
}

/// Worker thread body.
pub(crate) fn run(shared: &Shared) {
    loop {
        let batch = {
            let mut inbox = shared.inbox.lock();
            while inbox.entries.is_empty() && !inbox.stop_requested {
                shared.ready.wait(&mut inbox);
            }
            if inbox.stop_requested {
                break;
            }
            inbox.entries.drain_batch(BATCH_SIZE)
        };

        dispatch_batch(shared, &batch);
    }

    final_drain(shared);
}

/// Write every entry to every sink, then flush every sink once.
pub(crate) fn dispatch_batch(shared: &Shared, batch: &[Entry]) {
    let mut sinks = shared.sinks.lock();

    for entry in batch {
        for (idx, sink) in sinks.iter_mut().enumerate() {
            write_isolated(idx, sink.as_mut(), entry, &shared.metrics);
        }
        shared.metrics.record_dispatched();
    }

    for (idx, sink) in sinks.iter_mut().enumerate() {
        flush_isolated(idx, sink.as_mut(), &shared.metrics);
    }
}

/// Close the inbox and deliver whatever is left, flushing after each entry.
///
/// Runs on the worker thread at stop, or on the shutting-down thread when
/// the worker never started.
pub(crate) fn final_drain(shared: &Shared) {
    let remaining = {
        let mut inbox = shared.inbox.lock();
        inbox.closed = true;
        inbox.entries.drain_all()
    };

    let mut sinks = shared.sinks.lock();
    for entry in &remaining {
        for (idx, sink) in sinks.iter_mut().enumerate() {
            write_isolated(idx, sink.as_mut(), entry, &shared.metrics);
            flush_isolated(idx, sink.as_mut(), &shared.metrics);
        }
        shared.metrics.record_dispatched();
    }
}

fn write_isolated(idx: usize, sink: &mut dyn Sink, entry: &Entry, metrics: &PipelineMetrics) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(entry)));

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            metrics.record_write_failure();
            eprintln!("[LOGGER ERROR] Sink #{} ({}) failed: {}", idx, sink.name(), e);
        }
        Err(panic_info) => {
            metrics.record_write_failure();
            eprintln!(
                "[LOGGER CRITICAL] Sink #{} ({}) panicked: {}. \
                 Other sinks continue to function.",
                idx,
                sink.name(),
                panic_message(panic_info.as_ref())
            );
        }
    }
}

fn flush_isolated(idx: usize, sink: &mut dyn Sink, metrics: &PipelineMetrics) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.flush()));

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            metrics.record_flush_failure();
            eprintln!("[LOGGER ERROR] Sink #{} ({}) flush failed: {}", idx, sink.name(), e);
        }
        Err(panic_info) => {
            metrics.record_flush_failure();
            eprintln!(
                "[LOGGER CRITICAL] Sink #{} ({}) panicked during flush: {}. \
                 Other sinks continue to function.",
                idx,
                sink.name(),
                panic_message(panic_info.as_ref())
            );
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
