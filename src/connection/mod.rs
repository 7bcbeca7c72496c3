//! Connection management for the query runner.
//!
//! Centralizes the store connection lifecycle.

pub mod manager;

pub use manager::{ActiveConnection, ConnectionManager};
