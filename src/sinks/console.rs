//! Console sink implementation

use crate::core::format::console_line;
use crate::core::{Entry, Result, Sink};
use colored::Colorize;
use std::io::Write;

/// Writes one line per entry to standard output, colorized by severity
/// unless colors are disabled.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// The line as it would be printed, without the trailing newline
    pub fn render(&self, entry: &Entry) -> String {
        let line = console_line(entry);
        if self.use_colors {
            line.color(entry.severity().color()).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, entry: &Entry) -> Result<()> {
        let line = self.render(entry);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_plain_render_matches_console_line() {
        let sink = ConsoleSink::with_colors(false);
        let entry = Entry::new(Severity::Warn, "careful");
        assert_eq!(sink.render(&entry), console_line(&entry));
    }

    #[test]
    fn test_colored_render_keeps_text() {
        colored::control::set_override(true);
        let sink = ConsoleSink::new();
        let entry = Entry::new(Severity::Error, "boom");
        let rendered = sink.render(&entry);
        colored::control::unset_override();

        assert!(rendered.starts_with("\u{1b}[31m"));
        assert!(rendered.ends_with("\u{1b}[0m"));
        assert!(rendered.contains(&console_line(&entry)));
    }

    #[test]
    fn test_write_and_repeated_flush() {
        let mut sink = ConsoleSink::with_colors(false);
        sink.write(&Entry::new(Severity::Info, "console sink test line"))
            .unwrap();
        sink.flush().unwrap();
        sink.flush().unwrap();
    }
}
