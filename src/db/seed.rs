//! Seed data loading.

use super::types::Book;
use crate::error::{BookstoreError, Result};
use std::path::Path;

/// Built-in sample catalog used by the in-memory store.
const SAMPLE_CATALOG: &str = include_str!("../../fixtures/books.json");

/// Parses a JSON array of books.
pub fn parse_books(json: &str) -> Result<Vec<Book>> {
    serde_json::from_str(json)
        .map_err(|e| BookstoreError::config(format!("Invalid seed data: {e}")))
}

/// Loads a JSON array of books from a file.
pub fn load_books(path: &Path) -> Result<Vec<Book>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BookstoreError::config(format!(
            "Failed to read seed file {}: {e}",
            path.display()
        ))
    })?;
    parse_books(&content)
}

/// Returns the built-in sample catalog.
pub fn sample_catalog() -> Result<Vec<Book>> {
    parse_books(SAMPLE_CATALOG)
}
