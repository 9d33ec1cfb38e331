//! Status lines printed by every command.
//!
//! Each line is a coloured marker followed by the message. Errors go to
//! stderr, everything else to stdout.

use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn marker(self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => (CYAN, "•"),
            Tone::Success => (GREEN, "✔"),
            Tone::Warning => (YELLOW, "!"),
            Tone::Error => (RED, "✘"),
        }
    }
}

fn line(tone: Tone, msg: &dyn Display) -> String {
    let (color, mark) = tone.marker();
    format!("{color}{mark}{RESET} {msg}")
}

pub fn info(msg: impl Display) {
    println!("{}", line(Tone::Info, &msg));
}

pub fn success(msg: impl Display) {
    println!("{}", line(Tone::Success, &msg));
}

pub fn warning(msg: impl Display) {
    println!("{}", line(Tone::Warning, &msg));
}

pub fn error(msg: impl Display) {
    eprintln!("{}", line(Tone::Error, &msg));
}

/// Title above a report table, underlined to its own width.
pub fn header(msg: impl Display) {
    let title = msg.to_string();
    let width = crate::utils::table::visible_width(&title);
    println!("\n{CYAN}{title}{RESET}\n{}", "=".repeat(width));
}
