//! Query sequence tests against the in-memory store.
//!
//! Each test seeds a known catalog and checks one step's result.

use super::common::known_catalog;
use async_trait::async_trait;
use bookstore_queries::db::{
    Book, BookStore, Field, Filter, MockBookStore, SortSpec, Value,
};
use bookstore_queries::error::{BookstoreError, Result};
use bookstore_queries::output::Table;
use bookstore_queries::query::{QueryRunner, RunReport};
use pretty_assertions::assert_eq;

async fn run_known_catalog() -> (MockBookStore, RunReport) {
    let store = MockBookStore::with_books(known_catalog());
    let mut out = Vec::new();
    let report = QueryRunner::new(&store).run(&mut out).await.unwrap();
    (store, report)
}

fn texts(table: &Table, header: &str) -> Vec<String> {
    table
        .column(header)
        .unwrap()
        .into_iter()
        .map(Value::to_display_string)
        .collect()
}

#[tokio::test]
async fn test_find_all_returns_every_record() {
    let (_, report) = run_known_catalog().await;
    let table = report.table(1).unwrap();

    assert_eq!(table.headers, vec!["Title", "Author", "Year"]);
    assert_eq!(table.len(), known_catalog().len());
}

#[tokio::test]
async fn test_find_by_author() {
    let (_, report) = run_known_catalog().await;
    let table = report.table(2).unwrap();

    assert_eq!(table.headers, vec!["Title", "Year"]);
    assert_eq!(texts(table, "Title"), vec!["1984", "Animal Farm"]);
}

#[tokio::test]
async fn test_find_published_after_excludes_boundary_year() {
    let (_, report) = run_known_catalog().await;
    let table = report.table(3).unwrap();

    assert_eq!(
        texts(table, "Title"),
        vec!["The Lord of the Rings", "The Alchemist"]
    );
    for year in table.column("Year").unwrap() {
        assert_eq!(year.compare(&Value::Int(1950)), Some(std::cmp::Ordering::Greater));
    }
}

#[tokio::test]
async fn test_find_in_stock() {
    let (_, report) = run_known_catalog().await;
    let table = report.table(4).unwrap();

    assert_eq!(table.headers, vec!["Title", "Price"]);
    let expected: Vec<String> = known_catalog()
        .into_iter()
        .filter(|b| b.in_stock)
        .map(|b| b.title)
        .collect();
    assert_eq!(texts(table, "Title"), expected);
}

#[tokio::test]
async fn test_find_fantasy() {
    let (_, report) = run_known_catalog().await;
    let table = report.table(5).unwrap();

    assert_eq!(table.headers, vec!["Title", "Author"]);
    assert_eq!(
        texts(table, "Title"),
        vec!["The Hobbit", "The Lord of the Rings"]
    );
}

#[tokio::test]
async fn test_update_price_of_1984() {
    let (store, report) = run_known_catalog().await;
    assert_eq!(report.count(6), Some(1));

    let books = store
        .find(&Filter::eq(Field::Title, "1984"), None)
        .await
        .unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].price, 12.5);
}

#[tokio::test]
async fn test_update_reports_zero_when_absent() {
    let catalog: Vec<Book> = known_catalog()
        .into_iter()
        .filter(|b| b.title != "1984")
        .collect();
    let store = MockBookStore::with_books(catalog);
    let mut out = Vec::new();
    let report = QueryRunner::new(&store).run(&mut out).await.unwrap();

    assert_eq!(report.count(6), Some(0));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("6. Updated 0 book(s) price for '1984'"));
}

#[tokio::test]
async fn test_delete_out_of_stock() {
    let out_of_stock = known_catalog().iter().filter(|b| !b.in_stock).count() as u64;
    let (store, report) = run_known_catalog().await;

    assert_eq!(report.count(7), Some(out_of_stock));
    let remaining = store
        .count(&Filter::eq(Field::InStock, false))
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_total_after_delete() {
    let (_, report) = run_known_catalog().await;
    let deleted = report.count(7).unwrap();
    let total = known_catalog().len() as u64;

    assert_eq!(report.count(8), Some(total - deleted));
}

#[tokio::test]
async fn test_sorted_newest_first() {
    let (_, report) = run_known_catalog().await;
    let table = report.table(9).unwrap();

    let years: Vec<i64> = table
        .column("Year")
        .unwrap()
        .into_iter()
        .map(|v| match v {
            Value::Int(y) => *y,
            other => panic!("Expected Int for year, got {other:?}"),
        })
        .collect();
    assert!(!years.is_empty());
    assert!(years.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(years.first(), Some(&1988));
}

#[tokio::test]
async fn test_sample_catalog_sequence() {
    let store = MockBookStore::with_sample_catalog().unwrap();
    let mut out = Vec::new();
    let report = QueryRunner::new(&store).run(&mut out).await.unwrap();

    assert_eq!(report.table(1).map(Table::len), Some(12));
    assert_eq!(report.count(6), Some(1));
    assert_eq!(report.count(7), Some(3));
    assert_eq!(report.count(8), Some(9));
}

/// Wraps the in-memory store and rejects deletes.
struct DeleteRejectingStore {
    inner: MockBookStore,
}

#[async_trait]
impl BookStore for DeleteRejectingStore {
    async fn find(&self, filter: &Filter, sort: Option<SortSpec>) -> Result<Vec<Book>> {
        self.inner.find(filter, sort).await
    }

    async fn update_one(&self, filter: &Filter, field: Field, value: Value) -> Result<u64> {
        self.inner.update_one(filter, field, value).await
    }

    async fn delete_many(&self, _filter: &Filter) -> Result<u64> {
        Err(BookstoreError::query("delete not permitted"))
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        self.inner.count(filter).await
    }

    async fn insert_many(&self, books: &[Book]) -> Result<u64> {
        self.inner.insert_many(books).await
    }

    async fn close(&self) -> Result<()> {
        self.inner.close().await
    }
}

#[tokio::test]
async fn test_failure_mid_sequence_leaves_earlier_changes() {
    let store = DeleteRejectingStore {
        inner: MockBookStore::with_books(known_catalog()),
    };
    let mut out = Vec::new();
    let err = QueryRunner::new(&store).run(&mut out).await.unwrap_err();
    assert_eq!(err.to_string(), "Query error: delete not permitted");

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("6. Updated 1 book(s) price for '1984'"));
    assert!(!text.contains("7. Deleted"));
    assert!(!text.contains("8. Total"));

    // No transaction: the price update from step 6 stays applied.
    let books = store.inner.snapshot().await;
    let orwell = books.iter().find(|b| b.title == "1984").unwrap();
    assert_eq!(orwell.price, 12.5);
    assert_eq!(books.len(), known_catalog().len());
}
