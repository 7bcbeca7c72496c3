//! Store abstraction layer for the bookstore.
//!
//! Provides a trait-based interface for the collection operations, allowing
//! the MongoDB backend and the in-memory backend to be used interchangeably.

mod filter;
mod mock;
mod mongo;
mod seed;
mod types;

pub use filter::{Comparison, Filter, Predicate, SortDirection, SortSpec};
pub use mock::{FailingBookStore, MockBookStore};
pub use mongo::MongoBookStore;
pub use seed::{load_books, parse_books, sample_catalog};
pub use types::{Book, Field, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Creates a store for the given configuration.
///
/// This is the central factory function for store connections. A non-empty
/// `seed` is inserted into the MongoDB collection, or becomes the whole
/// in-memory store in place of the sample catalog.
pub async fn connect(config: &ConnectionConfig, seed: &[Book]) -> Result<Box<dyn BookStore>> {
    if config.mock {
        if seed.is_empty() {
            return Ok(Box::new(MockBookStore::with_sample_catalog()?));
        }
        info!("Seeded {} book(s)", seed.len());
        return Ok(Box::new(MockBookStore::with_books(seed.to_vec())));
    }

    let store = MongoBookStore::connect(config).await?;
    if !seed.is_empty() {
        let inserted = store.insert_many(seed).await?;
        info!("Seeded {inserted} book(s)");
    }
    Ok(Box::new(store))
}

/// Trait defining the operations run against one book collection.
///
/// All operations are async and return Results with BookstoreError.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Returns the records matching the filter, optionally sorted.
    async fn find(&self, filter: &Filter, sort: Option<SortSpec>) -> Result<Vec<Book>>;

    /// Sets `field` to `value` on the first record matching the filter.
    ///
    /// Returns the modified count: 0 when nothing matched or the value was
    /// already in place, otherwise 1.
    async fn update_one(&self, filter: &Filter, field: Field, value: Value) -> Result<u64>;

    /// Removes every record matching the filter and returns the deleted count.
    async fn delete_many(&self, filter: &Filter) -> Result<u64>;

    /// Counts the records matching the filter.
    async fn count(&self, filter: &Filter) -> Result<u64>;

    /// Inserts the given records and returns how many were written.
    async fn insert_many(&self, books: &[Book]) -> Result<u64>;

    /// Closes the store connection.
    async fn close(&self) -> Result<()>;
}
