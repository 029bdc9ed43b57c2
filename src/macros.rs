//! Logging macros for ergonomic message formatting.
//!
//! The macros check the logger's minimum severity before rendering, so a
//! filtered call costs one atomic load and no formatting. A `Display`
//! implementation that fails while rendering produces
//! `[FORMAT_ERROR] <format string>` instead of a panic.
//!
//! # Examples
//!
//! ```
//! use logpipe::prelude::*;
//! use logpipe::{info, log_if, log_scope, warn};
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let health = 20;
//! log_if!(logger, health < 30, Severity::Error, "health critical ({}/{})", health, 100);
//!
//! {
//!     log_scope!(logger, "warmup");
//!     warn!(logger, "cache cold");
//! }
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use logpipe::prelude::*;
/// # let logger = Logger::new();
/// use logpipe::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $fmt:literal $($arg:tt)*) => {{
        let logger = &$logger;
        let severity = $severity;
        if logger.is_enabled(severity) {
            logger.log(
                severity,
                $crate::core::format::render($fmt, ::std::format_args!($fmt $($arg)*)),
            );
        }
    }};
}

/// Log only when a condition holds; nothing is rendered otherwise.
///
/// ```
/// # use logpipe::prelude::*;
/// # let logger = Logger::new();
/// use logpipe::log_if;
/// let retries = 3;
/// log_if!(logger, retries > 2, Severity::Warn, "retried {} times", retries);
/// ```
#[macro_export]
macro_rules! log_if {
    ($logger:expr, $condition:expr, $severity:expr, $($arg:tt)+) => {
        if $condition {
            $crate::log!($logger, $severity, $($arg)+)
        }
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use logpipe::prelude::*;
/// # let logger = Logger::new();
/// use logpipe::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

/// Time the rest of the enclosing block (debug severity unless given).
///
/// ```
/// # use logpipe::prelude::*;
/// # let logger = Logger::new();
/// use logpipe::log_scope;
/// fn load(logger: &Logger) {
///     log_scope!(logger, "load", Severity::Info);
///     // ...
/// }
/// load(&logger);
/// ```
#[macro_export]
macro_rules! log_scope {
    ($logger:expr, $name:expr) => {
        $crate::log_scope!($logger, $name, $crate::Severity::Debug);
    };
    ($logger:expr, $name:expr, $severity:expr) => {
        let _scope_timer = $logger.scope($name, $severity);
    };
}
