//! Configuration management for the bookstore query runner.
//!
//! Handles loading configuration from TOML files and environment variables,
//! with support for named MongoDB connection profiles.

use crate::error::{BookstoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Default MongoDB connection URI.
pub const DEFAULT_URI: &str = "mongodb://localhost:27017";

/// Default database name.
pub const DEFAULT_DATABASE: &str = "plp_bookstore";

/// Default collection name.
pub const DEFAULT_COLLECTION: &str = "books";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Named connection profiles.
    #[serde(default)]
    pub connections: HashMap<String, ConnectionConfig>,
}

/// MongoDB connection configuration.
///
/// Every field is optional so that layers (CLI, config file, environment)
/// can be merged before falling back to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Connection URI (`mongodb://` or `mongodb+srv://`).
    pub uri: Option<String>,

    /// Database name.
    pub database: Option<String>,

    /// Collection name.
    pub collection: Option<String>,

    /// Use the in-memory store instead of a server.
    #[serde(skip)]
    pub mock: bool,
}

impl ConnectionConfig {
    /// Returns the effective URI.
    pub fn uri(&self) -> &str {
        self.uri.as_deref().unwrap_or(DEFAULT_URI)
    }

    /// Returns the effective database name.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Returns the effective collection name.
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &ConnectionConfig) {
        if other.uri.is_some() {
            self.uri = other.uri.clone();
        }
        if other.database.is_some() {
            self.database = other.database.clone();
        }
        if other.collection.is_some() {
            self.collection = other.collection.clone();
        }
        self.mock |= other.mock;
    }

    /// Applies environment variables (MONGODB_URI, etc.) as defaults.
    pub fn apply_env_defaults(&mut self) {
        self.apply_defaults_from(|key| std::env::var(key).ok());
    }

    /// Fills unset fields from the given variable lookup.
    pub fn apply_defaults_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.uri.is_none() {
            self.uri = lookup("MONGODB_URI");
        }
        if self.database.is_none() {
            self.database = lookup("MONGODB_DATABASE");
        }
        if self.collection.is_none() {
            self.collection = lookup("MONGODB_COLLECTION");
        }
    }

    /// Checks that the URI and names are usable.
    pub fn validate(&self) -> Result<()> {
        let uri = self.uri();
        let scheme = uri
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .ok_or_else(|| BookstoreError::config(format!("Invalid connection URI: {uri}")))?;

        if scheme != "mongodb" && scheme != "mongodb+srv" {
            return Err(BookstoreError::config(format!(
                "Invalid scheme '{scheme}'. Expected 'mongodb' or 'mongodb+srv'"
            )));
        }
        if self.database().is_empty() {
            return Err(BookstoreError::config("Database name must not be empty"));
        }
        if self.collection().is_empty() {
            return Err(BookstoreError::config("Collection name must not be empty"));
        }
        Ok(())
    }

    /// Returns a display-safe string (no password) for log output.
    pub fn display_string(&self) -> String {
        if self.mock {
            return format!("{}.{} @ in-memory", self.database(), self.collection());
        }
        format!(
            "{}.{} @ {}",
            self.database(),
            self.collection(),
            redact_uri(self.uri())
        )
    }
}

/// Strips credentials from a connection URI.
fn redact_uri(uri: &str) -> String {
    // Single-host URIs parse cleanly; seed lists (`host1,host2`) do not.
    if let Ok(mut url) = Url::parse(uri) {
        if url.password().is_some() || !url.username().is_empty() {
            let _ = url.set_password(None);
            let _ = url.set_username("");
        }
        return url.to_string();
    }

    match (uri.split_once("://"), uri.rfind('@')) {
        (Some((scheme, _)), Some(at)) => format!("{scheme}://{}", &uri[at + 1..]),
        _ => uri.to_string(),
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bookstore-queries")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| BookstoreError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            BookstoreError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named connection, or the default connection if name is None.
    pub fn get_connection(&self, name: Option<&str>) -> Option<&ConnectionConfig> {
        let key = name.unwrap_or("default");
        self.connections.get(key)
    }
}
