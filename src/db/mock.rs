//! In-memory book stores.
//!
//! `MockBookStore` keeps records in a vector and evaluates filters locally,
//! for `--mock-db` runs and tests. `FailingBookStore` rejects every operation.

use super::seed;
use super::{Book, BookStore, Field, Filter, SortSpec, Value};
use crate::error::{BookstoreError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// A book store backed by an in-memory vector.
#[derive(Debug, Default)]
pub struct MockBookStore {
    books: Mutex<Vec<Book>>,
    closed: AtomicBool,
}

impl MockBookStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            closed: AtomicBool::new(false),
        }
    }

    /// Creates a store holding the built-in sample catalog.
    pub fn with_sample_catalog() -> Result<Self> {
        Ok(Self::with_books(seed::sample_catalog()?))
    }

    /// Returns a copy of the current records.
    pub async fn snapshot(&self) -> Vec<Book> {
        self.books.lock().await.clone()
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(BookstoreError::connection("Store is closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MockBookStore {
    async fn find(&self, filter: &Filter, sort: Option<SortSpec>) -> Result<Vec<Book>> {
        self.ensure_open()?;
        let mut matched: Vec<Book> = self
            .books
            .lock()
            .await
            .iter()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            sort.apply(&mut matched);
        }
        Ok(matched)
    }

    async fn update_one(&self, filter: &Filter, field: Field, value: Value) -> Result<u64> {
        self.ensure_open()?;
        let mut books = self.books.lock().await;
        let Some(book) = books.iter_mut().find(|book| filter.matches(book)) else {
            return Ok(0);
        };
        // Like the server, an assignment that changes nothing is not a modification.
        if book.get(field).compare(&value) == Some(std::cmp::Ordering::Equal) {
            return Ok(0);
        }
        book.set(field, &value)?;
        Ok(1)
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64> {
        self.ensure_open()?;
        let mut books = self.books.lock().await;
        let before = books.len();
        books.retain(|book| !filter.matches(book));
        Ok((before - books.len()) as u64)
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        self.ensure_open()?;
        let books = self.books.lock().await;
        Ok(books.iter().filter(|book| filter.matches(book)).count() as u64)
    }

    async fn insert_many(&self, new_books: &[Book]) -> Result<u64> {
        self.ensure_open()?;
        self.books.lock().await.extend_from_slice(new_books);
        Ok(new_books.len() as u64)
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A book store whose operations always fail.
#[derive(Debug, Default)]
pub struct FailingBookStore {
    message: String,
    closed: AtomicBool,
}

impl FailingBookStore {
    /// Creates a store that fails with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T> {
        Err(BookstoreError::query(self.message.clone()))
    }
}

#[async_trait]
impl BookStore for FailingBookStore {
    async fn find(&self, _filter: &Filter, _sort: Option<SortSpec>) -> Result<Vec<Book>> {
        self.fail()
    }

    async fn update_one(&self, _filter: &Filter, _field: Field, _value: Value) -> Result<u64> {
        self.fail()
    }

    async fn delete_many(&self, _filter: &Filter) -> Result<u64> {
        self.fail()
    }

    async fn count(&self, _filter: &Filter) -> Result<u64> {
        self.fail()
    }

    async fn insert_many(&self, _books: &[Book]) -> Result<u64> {
        self.fail()
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
