//! Line and message rendering
//!
//! Everything here runs on the producer side (message rendering) or inside a
//! sink (line rendering). The worker itself never formats.

use super::entry::Entry;
use chrono::{DateTime, Local};
use std::fmt::{self, Write};

/// `2025-01-08 10:30:45.123`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Prefix of a message whose arguments failed to render
pub const FORMAT_ERROR_SENTINEL: &str = "[FORMAT_ERROR]";

/// Token replaced by [`substitute`]
pub const PLACEHOLDER: &str = "{}";

pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// `[<timestamp>] <SEVERITY> [<producer-id>] <message>`, no trailing newline.
pub fn console_line(entry: &Entry) -> String {
    format!(
        "[{}] {:5} [{}] {}",
        format_timestamp(entry.timestamp()),
        entry.severity(),
        entry.producer(),
        entry.message()
    )
}

/// `[<timestamp>] [<SEVERITY>] [<producer hash>] <message>\n`
pub fn file_line(entry: &Entry) -> String {
    format!(
        "[{}] [{:5}] [{}] {}\n",
        format_timestamp(entry.timestamp()),
        entry.severity(),
        entry.producer().hash_value(),
        entry.message()
    )
}

/// Sentinel message used when rendering `template` failed.
pub fn format_error(template: &str) -> String {
    format!("{} {}", FORMAT_ERROR_SENTINEL, template)
}

/// Render pre-compiled format arguments. A `Display` implementation that
/// reports an error yields the sentinel message instead of panicking the
/// caller the way `format!` would.
pub fn render(template: &str, args: fmt::Arguments<'_>) -> String {
    if let Some(literal) = args.as_str() {
        return literal.to_owned();
    }

    let mut out = String::new();
    match out.write_fmt(args) {
        Ok(()) => out,
        Err(_) => format_error(template),
    }
}

/// Runtime `{}` substitution for templates that are not known at compile time.
///
/// Arguments replace placeholders left to right. Surplus arguments are
/// dropped and surplus placeholders stay in the output verbatim.
///
/// # Example
///
/// ```
/// use logpipe::core::format::substitute;
///
/// assert_eq!(substitute("player {} at ({}, {})", &[&7, &1.5, &"x"]), "player 7 at (1.5, x)");
/// assert_eq!(substitute("{} and {}", &[&1]), "1 and {}");
/// assert_eq!(substitute("no slots", &[&1, &2]), "no slots");
/// ```
pub fn substitute(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    for arg in args {
        let Some(pos) = rest.find(PLACEHOLDER) else {
            break;
        };
        out.push_str(&rest[..pos]);
        if write!(out, "{}", arg).is_err() {
            return format_error(template);
        }
        rest = &rest[pos + PLACEHOLDER.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::ProducerId;
    use crate::core::severity::Severity;
    use chrono::TimeZone;

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn fixed_entry(severity: Severity, message: &str) -> Entry {
        let ts = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 2)
            .single()
            .expect("unambiguous local time")
            + chrono::Duration::milliseconds(42);
        Entry::at(ts, severity, ProducerId::current(), message)
    }

    #[test]
    fn test_timestamp_has_millisecond_precision() {
        let entry = fixed_entry(Severity::Info, "x");
        assert_eq!(format_timestamp(entry.timestamp()), "2024-03-09 07:05:02.042");
    }

    #[test]
    fn test_console_line_layout() {
        let entry = fixed_entry(Severity::Info, "server up");
        let expected = format!(
            "[2024-03-09 07:05:02.042] INFO  [{}] server up",
            ProducerId::current()
        );
        assert_eq!(console_line(&entry), expected);
    }

    #[test]
    fn test_file_line_layout() {
        let entry = fixed_entry(Severity::Warn, "disk low");
        let expected = format!(
            "[2024-03-09 07:05:02.042] [WARN ] [{}] disk low\n",
            ProducerId::current().hash_value()
        );
        assert_eq!(file_line(&entry), expected);
    }

    #[test]
    fn test_render_plain_and_formatted() {
        assert_eq!(render("static", format_args!("static")), "static");
        assert_eq!(render("id={}", format_args!("id={}", 42)), "id=42");
    }

    #[test]
    fn test_render_failure_uses_sentinel() {
        let rendered = render("value {}", format_args!("value {}", Broken));
        assert_eq!(rendered, "[FORMAT_ERROR] value {}");
    }

    #[test]
    fn test_substitute_failure_uses_sentinel() {
        assert_eq!(
            substitute("a {} b {}", &[&1, &Broken]),
            "[FORMAT_ERROR] a {} b {}"
        );
    }

    #[test]
    fn test_substitute_mismatches() {
        assert_eq!(substitute("{}{}{}", &[&"a", &"b"]), "ab{}");
        assert_eq!(substitute("{}", &[&"a", &"b", &"c"]), "a");
        assert_eq!(substitute("", &[]), "");
    }
}
