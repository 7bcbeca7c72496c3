//! MongoDB integration tests.
//!
//! Runs the query sequence against a scratch collection on a real server.

use super::common::known_catalog;
use bookstore_queries::config::ConnectionConfig;
use bookstore_queries::db::{BookStore, Field, Filter, MongoBookStore, SortSpec};
use bookstore_queries::query::QueryRunner;
use std::time::{SystemTime, UNIX_EPOCH};

/// Helper to get test server URI from environment.
fn get_test_uri() -> Option<String> {
    std::env::var("MONGODB_URI").ok()
}

/// Helper to connect to a fresh, seeded scratch collection.
async fn get_test_store() -> Option<MongoBookStore> {
    let uri = get_test_uri()?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let config = ConnectionConfig {
        uri: Some(uri),
        database: Some("bookstore_queries_test".to_string()),
        collection: Some(format!("books_{}_{nanos}", std::process::id())),
        mock: false,
    };
    let store = MongoBookStore::connect(&config).await.ok()?;
    store.insert_many(&known_catalog()).await.ok()?;
    Some(store)
}

#[tokio::test]
async fn test_filters_match_server_semantics() {
    let Some(store) = get_test_store().await else {
        eprintln!("Skipping test: MONGODB_URI not set");
        return;
    };

    let orwell = store
        .find(&Filter::eq(Field::Author, "George Orwell"), None)
        .await
        .unwrap();
    assert_eq!(orwell.len(), 2);

    let after_1950 = store
        .find(&Filter::gt(Field::PublishedYear, 1950), None)
        .await
        .unwrap();
    assert!(after_1950.iter().all(|b| b.published_year > 1950));
    assert!(!after_1950.iter().any(|b| b.title == "I, Robot"));

    let sorted = store
        .find(&Filter::all(), Some(SortSpec::descending(Field::PublishedYear)))
        .await
        .unwrap();
    assert!(sorted
        .windows(2)
        .all(|w| w[0].published_year >= w[1].published_year));

    store.drop_collection().await.unwrap();
    store.close().await.unwrap();
}

#[tokio::test]
async fn test_full_sequence() {
    let Some(store) = get_test_store().await else {
        eprintln!("Skipping test: MONGODB_URI not set");
        return;
    };

    let mut out = Vec::new();
    let report = QueryRunner::new(&store).run(&mut out).await.unwrap();

    let total = known_catalog().len() as u64;
    assert_eq!(report.table(1).map(|t| t.len() as u64), Some(total));
    assert_eq!(report.count(6), Some(1));
    assert_eq!(report.count(7), Some(2));
    assert_eq!(report.count(8), Some(total - 2));

    let updated = store
        .find(&Filter::eq(Field::Title, "1984"), None)
        .await
        .unwrap();
    assert_eq!(updated[0].price, 12.5);

    // Running the update again changes nothing.
    let mut out = Vec::new();
    let rerun = QueryRunner::new(&store).run(&mut out).await.unwrap();
    assert_eq!(rerun.count(6), Some(0));
    assert_eq!(rerun.count(7), Some(0));

    store.drop_collection().await.unwrap();
    store.close().await.unwrap();
}
