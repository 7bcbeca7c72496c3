//! Bookstore queries - runs a fixed sequence of queries against a MongoDB collection.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod connection;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
