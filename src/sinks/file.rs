//! Rotating file sink
//!
//! Size-based, generational rotation in the style of logrotate: the live
//! file is `path`, the most recent generation `path.1`, the oldest kept
//! generation `path.N`.

use crate::core::config::{DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_GENERATIONS};
use crate::core::format::file_line;
use crate::core::{Entry, LoggerError, Result, Sink};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File sink with size-based rotation.
///
/// A sink whose file cannot be opened stays usable but inert: writes are
/// silently dropped so the rest of the pipeline keeps running. Use
/// [`FileSink::try_new`] to surface the open error instead, or
/// [`FileSink::is_open`] to check afterwards.
///
/// # Examples
///
/// ```no_run
/// use logpipe::sinks::FileSink;
///
/// // 10 MiB per file, five generations
/// let sink = FileSink::new("/var/log/app.log");
///
/// // 1 MiB per file, three generations
/// let sink = FileSink::with_limits("/var/log/app.log", 1024 * 1024, 3);
/// assert!(sink.is_open());
/// ```
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    /// Bytes in the currently open file
    current_size: u64,
    max_size: u64,
    max_generations: usize,
}

impl FileSink {
    /// Open `path` with the default limits, degrading on failure.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_limits(path, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_GENERATIONS)
    }

    /// Open `path` with explicit limits, degrading on failure.
    ///
    /// An open failure is reported once on stderr; the returned sink then
    /// ignores writes.
    pub fn with_limits(path: impl AsRef<Path>, max_size: u64, max_generations: usize) -> Self {
        let path = path.as_ref();
        match Self::try_new(path, max_size, max_generations) {
            Ok(sink) => sink,
            Err(e) => {
                eprintln!("[LOGGER WARNING] {}. File output is disabled.", e);
                Self {
                    path: path.to_path_buf(),
                    writer: None,
                    current_size: 0,
                    max_size,
                    max_generations,
                }
            }
        }
    }

    /// Open `path`, creating its parent directory, and pick up the size of
    /// any existing file so limits hold across restarts.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or opened.
    pub fn try_new(path: impl AsRef<Path>, max_size: u64, max_generations: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            current_size,
            max_size,
            max_generations,
        })
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// Path of rotated generation `index` (`path.<index>`)
    pub fn generation_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    /// Shift generations up by one and start a fresh live file.
    ///
    /// On failure the sink is left closed.
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.max_generations > 0 {
            let oldest = self.generation_path(self.max_generations);
            if oldest.exists() {
                fs::remove_file(&oldest).map_err(|e| {
                    LoggerError::file_rotation(
                        oldest.display().to_string(),
                        format!("Failed to remove oldest generation: {}", e),
                    )
                })?;
            }

            for i in (1..self.max_generations).rev() {
                let from = self.generation_path(i);
                if from.exists() {
                    let to = self.generation_path(i + 1);
                    fs::rename(&from, &to).map_err(|e| {
                        LoggerError::file_rotation(
                            from.display().to_string(),
                            format!("Failed to shift generation: {}", e),
                        )
                    })?;
                }
            }

            if self.path.exists() {
                fs::rename(&self.path, self.generation_path(1)).map_err(|e| {
                    LoggerError::file_rotation(
                        self.path.display().to_string(),
                        format!("Failed to rotate current log file: {}", e),
                    )
                })?;
            }
        }

        // Truncate covers max_generations == 0, where no history is kept
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;

        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&mut self, entry: &Entry) -> Result<()> {
        if self.writer.is_none() {
            return Ok(());
        }

        let line = file_line(entry);
        let len = line.len() as u64;

        // Rotate before a line that would push a non-empty file past the limit
        if self.current_size > 0 && self.current_size + len > self.max_size {
            self.rotate()?;
        }

        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += len;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_sink(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
