//! Bookstore queries - runs a fixed sequence of queries against a MongoDB collection.

use bookstore_queries::cli::Cli;
use bookstore_queries::config::Config;
use bookstore_queries::db::{self, Book};
use bookstore_queries::error::Result;
use bookstore_queries::{logging, query};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // A .env file is optional.
    let _ = dotenvy::dotenv();
    logging::init_stderr_logging();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        // The executor has already logged the failing step.
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}: {}", e.category(), e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the query sequence completed.
async fn run() -> Result<bool> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = cli.resolve_connection(&config)?;
    info!("Connection: {}", connection.display_string());

    let seed: Vec<Book> = match &cli.seed {
        Some(path) => db::load_books(path)?,
        None => Vec::new(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = query::execute(&connection, &seed, &mut out).await;

    Ok(outcome.is_ok())
}
