//! Table rendering utilities for CLI outputs.
//!
//! Cells may carry ANSI colours; widths are measured on the visible text.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

fn ansi_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()).as_ref()
}

pub fn strip_ansi(s: &str) -> String {
    match ansi_re() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Terminal width of `s`, ignoring colour codes.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| visible_width(c))
                    .chain(std::iter::once(visible_width(&col.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn pad(cell: &str, width: usize, align: &Align) -> String {
        let fill = " ".repeat(width.saturating_sub(visible_width(cell)));
        match align {
            Align::Left => format!("{cell}{fill}"),
            Align::Right => format!("{fill}{cell}"),
        }
    }

    /// Header, a rule of `sep`, then one line per row.
    pub fn render(&self, sep: &str) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let line = |cells: Vec<String>| cells.join("  ").trim_end().to_string();

        out.push_str(&line(
            self.columns
                .iter()
                .zip(&widths)
                .map(|(c, w)| Self::pad(&c.header, *w, &c.align))
                .collect(),
        ));
        out.push('\n');

        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&sep.repeat(total));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&line(
                self.columns
                    .iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(i, (c, w))| {
                        Self::pad(row.get(i).map(String::as_str).unwrap_or(""), *w, &c.align)
                    })
                    .collect(),
            ));
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_ignore_colour_codes() {
        let mut t = Table::new(vec![Column::left("Name"), Column::right("Week")]);
        t.add_row(vec!["Laser".into(), "\x1b[31m95%\x1b[0m".into()]);
        t.add_row(vec!["Press".into(), "7%".into()]);

        let out = strip_ansi(&t.render("-"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name   Week");
        assert_eq!(lines[1], "-----------");
        assert_eq!(lines[2], "Laser   95%");
        assert_eq!(lines[3], "Press    7%");
    }
}
