//! CLI theme and styling.

use colored::Colorize;

/// Placeholder printed for a slot with no text.
const BLANK_MARKER: &str = "(blank)";

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Separator drawn above each widget surface.
    pub(crate) fn separator() -> String {
        "━".repeat(40).dimmed().to_string()
    }

    /// One slot as an aligned `name  text` line, blank text shown dimmed.
    ///
    /// Whitespace-only text counts as blank.
    pub(crate) fn slot(name: &str, text: &str, width: usize) -> String {
        let value = if text.trim().is_empty() {
            Self::dimmed(BLANK_MARKER)
        } else {
            text.to_owned()
        };
        format!("  {name:<width$}  {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_alignment() {
        colored::control::set_override(false);
        assert_eq!(Theme::slot("gm", "GM: 1.2 m", 4), "  gm    GM: 1.2 m");
        assert_eq!(Theme::slot("vcg", "", 3), "  vcg  (blank)");
        assert_eq!(Theme::slot("vcg", marin_core::BLANK, 3), "  vcg  (blank)");
    }
}
