//! Core pipeline types and traits

pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod scope;
pub mod severity;
pub mod sink;
pub mod worker;

pub use config::{
    ConsoleSinkConfig, FileSinkConfig, PipelineConfig, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_MAX_GENERATIONS,
};
pub use entry::{Entry, ProducerId};
pub use error::{LoggerError, Result};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::PipelineMetrics;
pub use queue::{EntryQueue, DEFAULT_MAX_QUEUE_SIZE};
pub use scope::ScopeTimer;
pub use severity::Severity;
pub use sink::Sink;
pub use worker::{WorkerState, BATCH_SIZE};
