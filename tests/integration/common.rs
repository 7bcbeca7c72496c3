//! Shared fixtures for integration tests.

use bookstore_queries::db::Book;

/// A catalog covering every predicate in the sequence, including a record
/// published exactly in 1950 and two out-of-stock records.
pub fn known_catalog() -> Vec<Book> {
    vec![
        Book::new("1984", "George Orwell", 1949, "Dystopian").with_price(10.99),
        Book::new("Animal Farm", "George Orwell", 1945, "Political Satire")
            .with_price(8.5)
            .with_in_stock(false),
        Book::new("The Hobbit", "J.R.R. Tolkien", 1937, "Fantasy").with_price(14.99),
        Book::new("The Lord of the Rings", "J.R.R. Tolkien", 1954, "Fantasy").with_price(19.99),
        Book::new("I, Robot", "Isaac Asimov", 1950, "Science Fiction").with_price(9.5),
        Book::new("The Alchemist", "Paulo Coelho", 1988, "Fiction").with_price(10.99),
        Book::new("Moby Dick", "Herman Melville", 1851, "Adventure")
            .with_price(12.5)
            .with_in_stock(false),
    ]
}
