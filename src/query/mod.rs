//! Query sequence definition and execution.
//!
//! This module isolates the fixed step list from the code that runs it
//! against a store and reports the results.

pub mod executor;
pub mod steps;

pub use executor::{execute, QueryRunner, RunReport};
pub use steps::{Operation, Step};
