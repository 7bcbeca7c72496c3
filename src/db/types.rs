//! Record and value types for the bookstore.
//!
//! Defines the book record read from the store, the queryable fields, and the
//! display-oriented value type used by filters and result tables.

use crate::error::{BookstoreError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A book document.
///
/// Unknown fields (`_id`, `pages`, `publisher`, ...) are ignored on read and
/// missing fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub published_year: i64,
    pub genre: String,
    pub in_stock: bool,
    pub price: f64,
}

impl Book {
    /// Creates an in-stock book with the given core attributes.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        published_year: i64,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            published_year,
            genre: genre.into(),
            in_stock: true,
            price: 0.0,
        }
    }

    /// Sets the stock flag.
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Returns the value of the given field.
    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::Title => Value::String(self.title.clone()),
            Field::Author => Value::String(self.author.clone()),
            Field::PublishedYear => Value::Int(self.published_year),
            Field::Genre => Value::String(self.genre.clone()),
            Field::InStock => Value::Bool(self.in_stock),
            Field::Price => Value::Float(self.price),
        }
    }

    /// Assigns a value to the given field.
    ///
    /// Integers are accepted for `price` and integral floats for
    /// `published_year`; any other type mismatch is rejected.
    pub fn set(&mut self, field: Field, value: &Value) -> Result<()> {
        match (field, value) {
            (Field::Title, Value::String(s)) => self.title = s.clone(),
            (Field::Author, Value::String(s)) => self.author = s.clone(),
            (Field::Genre, Value::String(s)) => self.genre = s.clone(),
            (Field::InStock, Value::Bool(b)) => self.in_stock = *b,
            (Field::PublishedYear, Value::Int(i)) => self.published_year = *i,
            (Field::PublishedYear, Value::Float(f)) if f.fract() == 0.0 => {
                self.published_year = *f as i64
            }
            (Field::Price, Value::Float(f)) => self.price = *f,
            (Field::Price, Value::Int(i)) => self.price = *i as f64,
            (field, value) => {
                return Err(BookstoreError::query(format!(
                    "Cannot set '{}' to {:?}",
                    field.key(),
                    value
                )))
            }
        }
        Ok(())
    }
}

/// A queryable book attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    PublishedYear,
    Genre,
    InStock,
    Price,
}

impl Field {
    /// Returns the document key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::PublishedYear => "published_year",
            Self::Genre => "genre",
            Self::InStock => "in_stock",
            Self::Price => "price",
        }
    }

    /// Returns the column header used in result tables.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::PublishedYear => "Year",
            Self::Genre => "Genre",
            Self::InStock => "In Stock",
            Self::Price => "Price",
        }
    }
}

/// Represents a single field value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),
}

impl Value {
    /// Attempts to convert the value to a string representation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }

    /// Orders two values of compatible types.
    ///
    /// Integers and floats compare numerically. Mismatched types and NULL
    /// are unordered, so they never satisfy an equality or range predicate.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

// Conversion implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}
