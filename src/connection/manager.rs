//! Connection manager for the store lifecycle.

use crate::config::ConnectionConfig;
use crate::db::{Book, BookStore};
use crate::error::{BookstoreError, Result};
use tracing::info;

/// An open store with its display name.
pub struct ActiveConnection {
    /// Display string (no credentials).
    pub display: String,
    /// The store.
    pub store: Box<dyn BookStore>,
}

/// Owns the store connection from open to close.
#[derive(Default)]
pub struct ConnectionManager {
    active: Option<ActiveConnection>,
}

impl ConnectionManager {
    /// Creates a manager with no connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects using the given configuration, starting from `seed` when it
    /// is non-empty.
    pub async fn connect(&mut self, config: &ConnectionConfig, seed: &[Book]) -> Result<()> {
        let store = crate::db::connect(config, seed).await?;

        let label = config.display_string();
        info!("Connected to {label}");
        self.active = Some(ActiveConnection {
            display: label,
            store,
        });

        Ok(())
    }

    /// Returns the active store.
    pub fn store(&self) -> Result<&dyn BookStore> {
        self.active
            .as_ref()
            .map(|c| c.store.as_ref())
            .ok_or_else(|| BookstoreError::connection("Not connected"))
    }

    /// Close the active connection. Closing with no connection is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.active.take() {
            conn.store.close().await?;
            info!("Closed connection to {}", conn.display);
        }
        Ok(())
    }
}
