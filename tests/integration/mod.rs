//! Integration tests for the bookstore query runner.

pub mod common;
pub mod mongo_test;
pub mod runner_test;
