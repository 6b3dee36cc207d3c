//! Formatting utilities used for CLI outputs.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Terminal width of `s`, ignoring ANSI escape sequences.
pub fn visible_width(s: &str) -> usize {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*m").expect("valid ansi regex"));
    UnicodeWidthStr::width(re.replace_all(s, "").as_ref())
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(pad))
}

/// Minutes since midnight as `HH:MM` (e.g. 495 → `08:15`).
pub fn minutes2clock(mins: u32) -> String {
    format!("{:02}:{:02}", mins / 60, mins % 60)
}
