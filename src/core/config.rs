//! Pipeline configuration
//!
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```
//! use logpipe::PipelineConfig;
//! use logpipe::Severity;
//!
//! let config = PipelineConfig::from_json_str(r#"{
//!     "min_severity": "warn",
//!     "files": [{ "path": "logs/app.log", "max_generations": 3 }]
//! }"#).unwrap();
//!
//! assert_eq!(config.min_severity, Severity::Warn);
//! assert_eq!(config.max_queue_size, 10_000);
//! assert_eq!(config.files[0].max_size, 10 * 1024 * 1024);
//! ```

use super::{
    error::{LoggerError, Result},
    queue::DEFAULT_MAX_QUEUE_SIZE,
    severity::Severity,
    sink::Sink,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default rotation threshold for file sinks (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default number of rotated generations kept next to the live file
pub const DEFAULT_MAX_GENERATIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub min_severity: Severity,
    pub max_queue_size: usize,
    /// Console output; `None` disables it
    pub console: Option<ConsoleSinkConfig>,
    pub files: Vec<FileSinkConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_severity: Severity::Debug,
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            console: None,
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    pub use_colors: bool,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    pub path: PathBuf,
    #[serde(default = "default_max_size")]
    pub max_size: u64,
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
}

impl FileSinkConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size: DEFAULT_MAX_FILE_SIZE,
            max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_max_generations() -> usize {
    DEFAULT_MAX_GENERATIONS
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero queue size or a zero file size.
    pub fn validate(&self) -> Result<()> {
        if self.max_queue_size == 0 {
            return Err(LoggerError::config(
                "PipelineConfig",
                "max_queue_size must be at least 1",
            ));
        }
        for file in &self.files {
            if file.max_size == 0 {
                return Err(LoggerError::config(
                    "FileSinkConfig",
                    format!("max_size for '{}' must be at least 1", file.path.display()),
                ));
            }
        }
        Ok(())
    }

    /// Instantiate the sinks this configuration describes, console first.
    ///
    /// File sinks that cannot be opened are created in their degraded
    /// (no-op) state rather than failing the whole logger.
    pub(crate) fn build_sinks(&self) -> Result<Vec<Box<dyn Sink>>> {
        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

        if let Some(console) = &self.console {
            #[cfg(feature = "console")]
            sinks.push(Box::new(crate::sinks::ConsoleSink::with_colors(console.use_colors)));
            #[cfg(not(feature = "console"))]
            {
                let _ = console;
                return Err(LoggerError::config(
                    "PipelineConfig",
                    "console output requires the `console` feature",
                ));
            }
        }

        for file in &self.files {
            #[cfg(feature = "file")]
            sinks.push(Box::new(crate::sinks::FileSink::with_limits(
                &file.path,
                file.max_size,
                file.max_generations,
            )));
            #[cfg(not(feature = "file"))]
            {
                let _ = file;
                return Err(LoggerError::config(
                    "PipelineConfig",
                    "file output requires the `file` feature",
                ));
            }
        }

        Ok(sinks)
    }
}
