//! MongoDB book store implementation.
//!
//! Provides the `MongoBookStore` struct that implements the `BookStore` trait
//! for a single MongoDB collection using the official driver.

use crate::config::ConnectionConfig;
use crate::db::filter::to_bson;
use crate::db::{Book, BookStore, Field, Filter, SortSpec, Value};
use crate::error::{BookstoreError, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::time::Instant;
use tracing::debug;

/// Application name reported to the server.
const APP_NAME: &str = "bookstore-queries";

/// MongoDB-backed book store bound to one collection.
#[derive(Debug, Clone)]
pub struct MongoBookStore {
    client: Client,
    collection: Collection<Book>,
}

impl MongoBookStore {
    /// Connects to the server and verifies the connection with a `ping`.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|e| BookstoreError::connection(format!("Invalid connection URI: {e}")))?;
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options)
            .map_err(|e| BookstoreError::connection(e.to_string()))?;

        // The driver connects lazily; ping so an unreachable server fails here.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| {
                BookstoreError::connection(format!(
                    "Cannot reach {}: {e}",
                    config.display_string()
                ))
            })?;
        debug!("Successfully connected to {}", config.display_string());

        let collection = client
            .database(config.database())
            .collection::<Book>(config.collection());

        Ok(Self { client, collection })
    }

    /// Drops the whole collection.
    pub async fn drop_collection(&self) -> Result<()> {
        self.collection.drop().await.map_err(query_error)
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn find(&self, filter: &Filter, sort: Option<SortSpec>) -> Result<Vec<Book>> {
        let start = Instant::now();
        let query = filter.to_document();
        debug!(filter = %query, "find");

        let mut action = self.collection.find(query);
        if let Some(sort) = sort {
            action = action.sort(sort.to_document());
        }
        let cursor = action.await.map_err(query_error)?;
        let books: Vec<Book> = cursor.try_collect().await.map_err(query_error)?;

        debug!("find returned {} documents in {:?}", books.len(), start.elapsed());
        Ok(books)
    }

    async fn update_one(&self, filter: &Filter, field: Field, value: Value) -> Result<u64> {
        let query = filter.to_document();
        let update = doc! { "$set": { field.key(): to_bson(&value) } };
        debug!(filter = %query, update = %update, "update_one");

        let result = self
            .collection
            .update_one(query, update)
            .await
            .map_err(query_error)?;
        Ok(result.modified_count)
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64> {
        let query = filter.to_document();
        debug!(filter = %query, "delete_many");

        let result = self
            .collection
            .delete_many(query)
            .await
            .map_err(query_error)?;
        Ok(result.deleted_count)
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        let query = filter.to_document();
        debug!(filter = %query, "count_documents");

        self.collection
            .count_documents(query)
            .await
            .map_err(query_error)
    }

    async fn insert_many(&self, books: &[Book]) -> Result<u64> {
        // The server rejects an empty batch.
        if books.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection
            .insert_many(books)
            .await
            .map_err(query_error)?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().shutdown().await;
        debug!("MongoDB client shut down");
        Ok(())
    }
}

fn query_error(e: mongodb::error::Error) -> BookstoreError {
    BookstoreError::query(e.to_string())
}
