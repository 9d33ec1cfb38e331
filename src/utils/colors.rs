//! ANSI color helper utilities for terminal output.

use crate::models::LoadStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Green => GREEN,
        LoadStatus::Yellow => YELLOW,
        LoadStatus::Red => RED,
    }
}

/// A single percentage, coloured with the same bands as the week status.
pub fn colorize_load(pct: i64) -> String {
    let color = color_for_status(LoadStatus::from_week_load(pct));
    format!("{color}{pct}%{RESET}")
}

/// Grey out placeholders such as `--` or `--:--`.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
