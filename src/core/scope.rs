//! Scope timing guard

use super::{logger::Logger, severity::Severity};
use std::time::{Duration, Instant};

/// Logs `Entering <name>` when created and `Exiting <name> (<ms>ms)` when
/// dropped, whichever way the scope is left.
///
/// # Example
///
/// ```
/// use logpipe::prelude::*;
///
/// let logger = Logger::new();
/// {
///     let _timer = logger.scope("load_assets", Severity::Info);
///     // work...
/// } // "Exiting load_assets (..ms)" is logged here
/// ```
#[must_use = "the scope is timed until this guard is dropped"]
pub struct ScopeTimer<'a> {
    logger: &'a Logger,
    name: String,
    severity: Severity,
    start: Instant,
}

impl<'a> ScopeTimer<'a> {
    pub fn new(logger: &'a Logger, name: impl Into<String>, severity: Severity) -> Self {
        let name = name.into();
        if logger.is_enabled(severity) {
            logger.log(severity, format!("Entering {}", name));
        }
        Self {
            logger,
            name,
            severity,
            start: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopeTimer<'_> {
    fn drop(&mut self) {
        if self.logger.is_enabled(self.severity) {
            self.logger.log(
                self.severity,
                format!("Exiting {} ({}ms)", self.name, self.elapsed().as_millis()),
            );
        }
    }
}
