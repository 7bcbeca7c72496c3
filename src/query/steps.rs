//! The fixed query sequence.
//!
//! Each `Step` pairs a store operation with how its result is reported.
//! `Step::catalog` returns the nine steps in execution order.

use crate::db::{Field, Filter, SortSpec, Value};

/// Placeholder replaced by the step's count in status lines.
const COUNT_PLACEHOLDER: &str = "{count}";

/// A store operation performed by a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read matching records and project `fields` into a table.
    Find {
        filter: Filter,
        sort: Option<SortSpec>,
        fields: Vec<Field>,
    },
    /// Set one field on the first matching record.
    UpdateOne {
        filter: Filter,
        field: Field,
        value: Value,
    },
    /// Remove every matching record.
    DeleteMany { filter: Filter },
    /// Count matching records.
    Count { filter: Filter },
}

/// One numbered step of the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Position in the sequence, starting at 1.
    pub number: u8,
    /// Table heading, or a status line containing `{count}`.
    pub label: String,
    /// The operation to run.
    pub operation: Operation,
}

impl Step {
    /// Creates a step.
    pub fn new(number: u8, label: impl Into<String>, operation: Operation) -> Self {
        Self {
            number,
            label: label.into(),
            operation,
        }
    }

    /// Returns the status line for a counting step.
    pub fn describe_count(&self, count: u64) -> String {
        format!(
            "{}. {}",
            self.number,
            self.label.replace(COUNT_PLACEHOLDER, &count.to_string())
        )
    }

    /// Returns the heading for a table step.
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.label)
    }

    /// Returns the bookstore query sequence.
    pub fn catalog() -> Vec<Step> {
        vec![
            Step::new(
                1,
                "All books:",
                Operation::Find {
                    filter: Filter::all(),
                    sort: None,
                    fields: vec![Field::Title, Field::Author, Field::PublishedYear],
                },
            ),
            Step::new(
                2,
                "Books by George Orwell:",
                Operation::Find {
                    filter: Filter::eq(Field::Author, "George Orwell"),
                    sort: None,
                    fields: vec![Field::Title, Field::PublishedYear],
                },
            ),
            Step::new(
                3,
                "Books published after 1950:",
                Operation::Find {
                    filter: Filter::gt(Field::PublishedYear, 1950),
                    sort: None,
                    fields: vec![Field::Title, Field::PublishedYear],
                },
            ),
            Step::new(
                4,
                "Books currently in stock:",
                Operation::Find {
                    filter: Filter::eq(Field::InStock, true),
                    sort: None,
                    fields: vec![Field::Title, Field::Price],
                },
            ),
            Step::new(
                5,
                "Fantasy books:",
                Operation::Find {
                    filter: Filter::eq(Field::Genre, "Fantasy"),
                    sort: None,
                    fields: vec![Field::Title, Field::Author],
                },
            ),
            Step::new(
                6,
                "Updated {count} book(s) price for '1984'",
                Operation::UpdateOne {
                    filter: Filter::eq(Field::Title, "1984"),
                    field: Field::Price,
                    value: Value::Float(12.5),
                },
            ),
            Step::new(
                7,
                "Deleted {count} out-of-stock book(s)",
                Operation::DeleteMany {
                    filter: Filter::eq(Field::InStock, false),
                },
            ),
            Step::new(
                8,
                "Total number of books after updates: {count}",
                Operation::Count {
                    filter: Filter::all(),
                },
            ),
            Step::new(
                9,
                "Books sorted by year (newest first):",
                Operation::Find {
                    filter: Filter::all(),
                    sort: Some(SortSpec::descending(Field::PublishedYear)),
                    fields: vec![Field::Title, Field::PublishedYear],
                },
            ),
        ]
    }
}
