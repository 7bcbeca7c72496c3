//! Console output for the query sequence.
//!
//! Step results are kept as data (`StepOutput`) and rendered to text
//! separately, so tests can inspect results without parsing the console.

use crate::db::{Book, Field, Value};
use std::fmt;

/// Header of the leading row-index column.
const INDEX_HEADER: &str = "(index)";

/// Output from one step of the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutput {
    /// A labelled table of projected records.
    Table {
        /// Heading printed above the table (e.g. "1. All books:").
        heading: String,
        /// The projected rows.
        table: Table,
    },

    /// A single status line carrying a count.
    Count {
        /// The full status line.
        message: String,
        /// The count reported by the store.
        count: u64,
    },
}

impl StepOutput {
    /// Creates a table output.
    pub fn table(heading: impl Into<String>, table: Table) -> Self {
        Self::Table {
            heading: heading.into(),
            table,
        }
    }

    /// Creates a count output.
    pub fn count(message: impl Into<String>, count: u64) -> Self {
        Self::Count {
            message: message.into(),
            count,
        }
    }

    /// Returns the table, if this is a table output.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table { table, .. } => Some(table),
            Self::Count { .. } => None,
        }
    }

    /// Returns the count, if this is a count output.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count { count, .. } => Some(*count),
            Self::Table { .. } => None,
        }
    }
}

impl fmt::Display for StepOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { heading, table } => {
                writeln!(f, "{heading}")?;
                for line in table.render_to_lines() {
                    writeln!(f, "{line}")?;
                }
                Ok(())
            }
            Self::Count { message, .. } => writeln!(f, "{message}"),
        }
    }
}

/// Tabular projection of a set of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data, one value per header.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Projects the given fields out of each book.
    pub fn from_books(books: &[Book], fields: &[Field]) -> Self {
        Self {
            headers: fields.iter().map(|f| f.header().to_string()).collect(),
            rows: books
                .iter()
                .map(|book| fields.iter().map(|&f| book.get(f)).collect())
                .collect(),
        }
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the values of one column, by header.
    pub fn column(&self, header: &str) -> Option<Vec<&Value>> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }

    /// Calculates the width of each column, index column first.
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.headers.len() + 1);

        let index_width = self
            .rows
            .len()
            .saturating_sub(1)
            .to_string()
            .len()
            .max(INDEX_HEADER.len());
        widths.push(index_width);

        for (i, header) in self.headers.iter().enumerate() {
            let widest_value = self
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|value| display_width(&value.to_display_string()))
                .max()
                .unwrap_or(0);
            widths.push(display_width(header).max(widest_value));
        }

        widths
    }

    /// Renders the table as bordered text lines, with a leading row-index column.
    pub fn render_to_lines(&self) -> Vec<String> {
        let widths = self.calculate_column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(render_border(&widths, '┌', '┬', '┐'));

        let mut header_cells = vec![INDEX_HEADER.to_string()];
        header_cells.extend(self.headers.iter().cloned());
        lines.push(render_row(&header_cells, &widths));

        lines.push(render_border(&widths, '├', '┼', '┤'));

        for (index, row) in self.rows.iter().enumerate() {
            let mut cells = vec![index.to_string()];
            cells.extend(row.iter().map(Value::to_display_string));
            lines.push(render_row(&cells, &widths));
        }

        lines.push(render_border(&widths, '└', '┴', '┘'));
        lines
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Renders a horizontal border line.
fn render_border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|&w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&mid.to_string()))
}

/// Renders one row of cells, left-aligned and padded to the column widths.
///
/// Cells are never cut; each column is as wide as its widest cell.
fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (cell, &width) in cells.iter().zip(widths) {
        let padding = width.saturating_sub(display_width(cell));
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding));
        line.push_str(" │");
    }
    line
}
