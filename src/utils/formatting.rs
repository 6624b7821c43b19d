//! Formatting utilities used for CLI and export outputs.

use crate::utils::colors::strip_ansi;
use unicode_width::UnicodeWidthStr;

/// Display width, ignoring ANSI escapes.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(fill))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{s}", " ".repeat(fill))
}

/// First wrapped line of `s`, with `…` when something was cut.
pub fn truncate(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }

    let lines = textwrap::wrap(s, width.saturating_sub(1).max(1));
    match lines.first() {
        Some(first) => format!("{}…", first.trim_end()),
        None => String::new(),
    }
}

/// `Some("")` and `None` both render as `--`.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}
