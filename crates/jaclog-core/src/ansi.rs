//! ANSI escape code handling utilities
//!
//! [`style`] is the only place escape sequences are produced. Everything the
//! renderer colors goes through it, so turning color off is one flag.
//! [`strip_ansi_codes`] removes sequences from text arriving from outside,
//! e.g. a message that was already colored by its author.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Regex pattern for ANSI escape sequences.
///
/// Covers:
/// - CSI sequences: ESC [ ... letter (colors, cursor, etc.)
/// - OSC sequences: ESC ] ... BEL or ST (hyperlinks, titles)
/// - Simple escapes: ESC letter
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]               # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)  # OSC sequences
        | \x1b[A-Za-z]                       # Simple escapes
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// Reset all attributes
pub const RESET: &str = "\x1b[0m";

/// A 256-color palette index used as foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Color(pub u8);

impl Color {
    /// SGR sequence selecting this color as foreground
    pub fn sgr(&self) -> String {
        format!("\x1b[38;5;{}m", self.0)
    }
}

/// Wrap `text` in the escape sequences for `color`.
///
/// With `ansi == false` the text is returned unchanged.
///
/// # Examples
///
/// ```
/// use jaclog_core::ansi::{style, Color};
///
/// assert_eq!(style("hi", Color(1), true), "\x1b[38;5;1mhi\x1b[0m");
/// assert_eq!(style("hi", Color(1), false), "hi");
/// ```
pub fn style(text: &str, color: Color, ansi: bool) -> String {
    if ansi {
        format!("{}{}{}", color.sgr(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Strip all ANSI escape sequences from a string.
///
/// # Examples
///
/// ```
/// use jaclog_core::strip_ansi_codes;
///
/// let input = "\x1b[31mred text\x1b[0m";
/// assert_eq!(strip_ansi_codes(input), "red text");
/// ```
pub fn strip_ansi_codes(input: &str) -> String {
    ANSI_ESCAPE_PATTERN.replace_all(input, "").into_owned()
}

/// Check if a string contains ANSI escape sequences.
pub fn contains_ansi_codes(input: &str) -> bool {
    ANSI_ESCAPE_PATTERN.is_match(input)
}

/// Prefix every line that has non-whitespace content with `prefix`.
///
/// Blank lines are left empty and line endings are kept as they are.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len() * 4);
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_wraps_with_256_color() {
        assert_eq!(style("text", Color(242), true), "\x1b[38;5;242mtext\x1b[0m");
    }

    #[test]
    fn test_style_plain_passthrough() {
        assert_eq!(style("text", Color(242), false), "text");
    }

    #[test]
    fn test_strip_undoes_style() {
        let styled = style("│ message", Color(33), true);
        assert_eq!(strip_ansi_codes(&styled), "│ message");
    }

    #[test]
    fn test_strip_simple_color_codes() {
        let input = "\x1b[31mred text\x1b[0m";
        assert_eq!(strip_ansi_codes(input), "red text");
    }

    #[test]
    fn test_strip_rgb_color_codes() {
        let input = "\x1b[38;2;255;100;50mRGB color\x1b[0m";
        assert_eq!(strip_ansi_codes(input), "RGB color");
    }

    #[test]
    fn test_strip_cursor_movement_codes() {
        let input = "\x1b[2Jclear\x1b[Hmove";
        assert_eq!(strip_ansi_codes(input), "clearmove");
    }

    #[test]
    fn test_osc_hyperlink() {
        let input = "\x1b]8;;https://example.com\x1b\\Link Text\x1b]8;;\x1b\\";
        assert_eq!(strip_ansi_codes(input), "Link Text");
    }

    #[test]
    fn test_preserve_box_drawing_and_dots() {
        let input = "  ─── 3.250s elapsed · ▶";
        assert_eq!(strip_ansi_codes(input), input);
    }

    #[test]
    fn test_contains_ansi_codes() {
        assert!(contains_ansi_codes("\x1b[31mred\x1b[0m"));
        assert!(!contains_ansi_codes("plain text"));
        assert!(!contains_ansi_codes(""));
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", "  "), "  a\n\n  b");
        assert_eq!(indent("\nhead\nbody", " "), "\n head\n body");
    }

    #[test]
    fn test_indent_whitespace_only_line_untouched() {
        assert_eq!(indent("a\n   \nb\n", ">"), ">a\n   \n>b\n");
    }

    #[test]
    fn test_indent_empty() {
        assert_eq!(indent("", "  "), "");
    }

    #[test]
    fn test_color_deserializes_from_integer() {
        let color: Color = serde_json::from_str("208").unwrap();
        assert_eq!(color, Color(208));
    }
}
