//! # logpipe
//!
//! An in-process, asynchronous log pipeline. Application threads submit
//! records to a [`Logger`]; a single background worker batches them and
//! delivers them to pluggable [`Sink`]s such as the console or a rotating
//! log file.
//!
//! ## Features
//!
//! - **Never blocks producers**: a bounded queue evicts its oldest entry
//!   instead of waiting on slow I/O
//! - **Lazy worker**: the delivery thread starts on first use, exactly once
//! - **Clean shutdown**: every queued entry is delivered before the worker exits
//! - **Rotating files**: size-based, generational rotation (`app.log.1` … `app.log.N`)
//!
//! ```
//! use logpipe::prelude::*;
//! use logpipe::info;
//!
//! let logger = Logger::builder()
//!     .min_severity(Severity::Info)
//!     .sink(ConsoleSink::with_colors(false))
//!     .build()?;
//!
//! info!(logger, "listening on port {}", 8080);
//! logger.shutdown()?;
//! # Ok::<(), logpipe::LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::core::{
        Entry, Logger, LoggerBuilder, LoggerError, PipelineConfig, PipelineMetrics, Result,
        ScopeTimer, Severity, Sink, WorkerState,
    };
}

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
pub use crate::core::{
    ConsoleSinkConfig, Entry, EntryQueue, FileSinkConfig, Logger, LoggerBuilder, LoggerError,
    PipelineConfig, PipelineMetrics, ProducerId, Result, ScopeTimer, Severity, Sink, WorkerState,
    BATCH_SIZE, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_GENERATIONS, DEFAULT_MAX_QUEUE_SIZE,
};
