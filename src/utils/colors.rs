//! ANSI color helpers for terminal output.

use crate::models::mark_type::MarkType;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ansi pattern is valid"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Clock-in green, clock-out red.
pub fn colorize_mark(value: &str, kind: MarkType) -> String {
    match kind {
        MarkType::ClockIn => Colour::Green.paint(value).to_string(),
        MarkType::ClockOut => Colour::Red.paint(value).to_string(),
    }
}

/// Grey for placeholders (`--`, empty, zero hours), unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "--:--" || v == "0.00" {
        Colour::Fixed(244).paint(value).to_string()
    } else {
        value.to_string()
    }
}

/// Totals in bold green, zero totals grey.
pub fn colorize_total(hours: f64, text: &str) -> String {
    if hours > 0.0 {
        Colour::Green.bold().paint(text).to_string()
    } else {
        Colour::Fixed(244).paint(text).to_string()
    }
}

/// Open sessions (no clock-out) in yellow.
pub fn colorize_open(text: &str) -> String {
    Colour::Yellow.italic().paint(text).to_string()
}
