//! Filter and sort specifications.
//!
//! A `Filter` is a conjunction of field predicates. It renders to a MongoDB
//! query document for the server backend and evaluates directly against a
//! `Book` for the in-memory backend, with matching semantics.

use super::types::{Book, Field, Value};
use mongodb::bson::{doc, Bson, Document};
use std::cmp::Ordering;

/// Comparison applied by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Field equals the value.
    Eq,
    /// Field is strictly greater than the value.
    Gt,
}

/// A single `field <op> value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: Field,
    pub comparison: Comparison,
    pub value: Value,
}

impl Predicate {
    /// Returns true if the book satisfies this predicate.
    pub fn matches(&self, book: &Book) -> bool {
        let ordering = book.get(self.field).compare(&self.value);
        match self.comparison {
            Comparison::Eq => ordering == Some(Ordering::Equal),
            Comparison::Gt => ordering == Some(Ordering::Greater),
        }
    }

    fn to_document(&self) -> Document {
        let value = to_bson(&self.value);
        match self.comparison {
            Comparison::Eq => doc! { self.field.key(): value },
            Comparison::Gt => doc! { self.field.key(): { "$gt": value } },
        }
    }
}

/// A conjunction of predicates. The empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches records where `field == value`.
    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Self::all().and(field, Comparison::Eq, value)
    }

    /// Matches records where `field > value`.
    pub fn gt(field: Field, value: impl Into<Value>) -> Self {
        Self::all().and(field, Comparison::Gt, value)
    }

    /// Adds another predicate to the conjunction.
    pub fn and(mut self, field: Field, comparison: Comparison, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            field,
            comparison,
            value: value.into(),
        });
        self
    }

    /// Returns the predicates in this filter.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns true if the book satisfies every predicate.
    pub fn matches(&self, book: &Book) -> bool {
        self.predicates.iter().all(|p| p.matches(book))
    }

    /// Renders the filter as a MongoDB query document.
    pub fn to_document(&self) -> Document {
        match self.predicates.as_slice() {
            [] => Document::new(),
            [single] => single.to_document(),
            many => {
                let clauses: Vec<Document> = many.iter().map(Predicate::to_document).collect();
                doc! { "$and": clauses }
            }
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Single-field sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Renders the sort as a MongoDB sort document.
    pub fn to_document(&self) -> Document {
        let order = match self.direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        };
        doc! { self.field.key(): order }
    }

    /// Sorts books in place. The sort is stable, so ties keep insertion order.
    pub fn apply(&self, books: &mut [Book]) {
        books.sort_by(|a, b| {
            let ordering = a
                .get(self.field)
                .compare(&b.get(self.field))
                .unwrap_or(Ordering::Equal);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

/// Converts a value into its BSON form.
pub(crate) fn to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Int(i) => Bson::Int64(*i),
        Value::Float(f) => Bson::Double(*f),
        Value::String(s) => Bson::String(s.clone()),
    }
}
