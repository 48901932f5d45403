//! Table rendering utilities for CLI outputs.

use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: OnceLock<regex::Regex> = OnceLock::new();

/// Remove ANSI escape sequences so colored cells measure correctly.
fn strip_ansi(s: &str) -> String {
    // The pattern is a literal and cannot fail to compile
    let re = ANSI_RE.get_or_init(|| regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap());
    re.replace_all(s, "").to_string()
}

/// Display width of a cell: escape codes excluded, wide glyphs counted.
fn cell_width(s: &str) -> usize {
    strip_ansi(s).width()
}

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
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

    pub fn render(&self) -> String {
        // Widen columns to fit their content (display width, not bytes)
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|r| r.get(i).map(|c| cell_width(c)).unwrap_or(0))
                    .chain(std::iter::once(col.header.width()))
                    .max()
                    .unwrap_or(col.width)
                    .max(col.width)
            })
            .collect();

        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad_cell(&col.header, *w));
        }
        out.push('\n');
        for w in &widths {
            out.push_str(&format!("{} ", "-".repeat(*w)));
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad_cell(cell, *w));
            }
            out.push('\n');
        }

        out
    }
}

/// Left-align a cell to `width` visible columns. Escape sequences take no
/// space, so padding is computed from the stripped width.
fn pad_cell(cell: &str, width: usize) -> String {
    let visible = cell_width(cell);
    let pad = width.saturating_sub(visible);
    format!("{}{} ", cell, " ".repeat(pad))
}
