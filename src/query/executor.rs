//! Sequential execution of the query steps.
//!
//! `QueryRunner` runs steps against any `BookStore`. `execute` wraps a full
//! session: connect, optional seeding, the sequence, and a close that runs on
//! every exit path.

use std::io::Write;
use std::time::Instant;

use crate::config::ConnectionConfig;
use crate::connection::ConnectionManager;
use crate::db::{Book, BookStore};
use crate::error::{BookstoreError, Result};
use crate::output::{StepOutput, Table};
use crate::query::{Operation, Step};
use tracing::{debug, error, warn};

/// Results of a completed sequence, in step order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub outputs: Vec<(u8, StepOutput)>,
}

impl RunReport {
    /// Returns the output of the step with the given number.
    pub fn step(&self, number: u8) -> Option<&StepOutput> {
        self.outputs
            .iter()
            .find(|(n, _)| *n == number)
            .map(|(_, output)| output)
    }

    /// Returns the table produced by the given step.
    pub fn table(&self, number: u8) -> Option<&Table> {
        self.step(number).and_then(StepOutput::as_table)
    }

    /// Returns the count produced by the given step.
    pub fn count(&self, number: u8) -> Option<u64> {
        self.step(number).and_then(StepOutput::as_count)
    }
}

/// Runs a list of steps, one at a time, against a store.
pub struct QueryRunner<'a> {
    store: &'a dyn BookStore,
    steps: Vec<Step>,
}

impl<'a> QueryRunner<'a> {
    /// Creates a runner for the bookstore sequence.
    pub fn new(store: &'a dyn BookStore) -> Self {
        Self::with_steps(store, Step::catalog())
    }

    /// Creates a runner for a custom list of steps.
    pub fn with_steps(store: &'a dyn BookStore, steps: Vec<Step>) -> Self {
        Self { store, steps }
    }

    /// Runs a single step.
    pub async fn run_step(&self, step: &Step) -> Result<StepOutput> {
        let start = Instant::now();
        let output = match &step.operation {
            Operation::Find {
                filter,
                sort,
                fields,
            } => {
                let books = self.store.find(filter, *sort).await?;
                StepOutput::table(step.heading(), Table::from_books(&books, fields))
            }
            Operation::UpdateOne {
                filter,
                field,
                value,
            } => {
                let modified = self.store.update_one(filter, *field, value.clone()).await?;
                StepOutput::count(step.describe_count(modified), modified)
            }
            Operation::DeleteMany { filter } => {
                let deleted = self.store.delete_many(filter).await?;
                StepOutput::count(step.describe_count(deleted), deleted)
            }
            Operation::Count { filter } => {
                let total = self.store.count(filter).await?;
                StepOutput::count(step.describe_count(total), total)
            }
        };
        debug!(step = step.number, "completed in {:?}", start.elapsed());
        Ok(output)
    }

    /// Runs every step in order, writing each result as it completes.
    ///
    /// The first failing step aborts the rest; earlier output stays written.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        emit(out, "\n=== MongoDB Queries ===\n")?;

        let mut report = RunReport::default();
        for (i, step) in self.steps.iter().enumerate() {
            let output = self.run_step(step).await?;
            if i > 0 {
                emit(out, "")?;
            }
            write!(out, "{output}").map_err(write_error)?;
            report.outputs.push((step.number, output));
        }
        Ok(report)
    }
}

/// Runs a full session against the configured store.
///
/// Connects (seeding the store when `seed` is non-empty), runs the sequence,
/// then closes the connection whether or not the sequence succeeded.
/// A failure is logged and returned after the close.
pub async fn execute<W: Write>(
    config: &ConnectionConfig,
    seed: &[Book],
    out: &mut W,
) -> Result<RunReport> {
    let mut manager = ConnectionManager::new();
    let outcome = run_connected(&mut manager, config, seed, out).await;

    if let Err(e) = manager.close().await {
        warn!("Failed to close connection: {e}");
    }
    if let Err(e) = &outcome {
        error!("Error running queries: {e}");
    }
    if let Err(e) = emit(out, "\nConnection closed") {
        if outcome.is_err() {
            warn!("{e}");
        } else {
            return Err(e);
        }
    }

    outcome
}

async fn run_connected<W: Write>(
    manager: &mut ConnectionManager,
    config: &ConnectionConfig,
    seed: &[Book],
    out: &mut W,
) -> Result<RunReport> {
    manager.connect(config, seed).await?;
    let store = manager.store()?;
    if config.mock {
        emit(out, "Connected to in-memory store")?;
    } else {
        emit(out, "Connected to MongoDB server")?;
    }

    QueryRunner::new(store).run(out).await
}

fn emit<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{line}").map_err(write_error)
}

fn write_error(e: std::io::Error) -> BookstoreError {
    BookstoreError::internal(format!("Failed to write output: {e}"))
}
