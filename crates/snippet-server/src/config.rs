//! Server configuration
//!
//! Built-in defaults overlaid with `SNIPPETS_*` environment variables.

use config::{Config, Environment};
use serde::Deserialize;
use snippet_core::{Result, SnippetError};
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://snippets.db";
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Which storage backend serves the routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub store: StoreKind,
    pub database_url: String,
    pub list_limit: usize,
    /// Pre-fill the in-memory store with example snippets.
    pub seed: bool,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix("SNIPPETS"))
    }

    fn from_env(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)
            .and_then(|b| b.set_default("store", "memory"))
            .and_then(|b| b.set_default("database_url", DEFAULT_DATABASE_URL))
            .and_then(|b| b.set_default("list_limit", DEFAULT_LIST_LIMIT))
            .and_then(|b| b.set_default("seed", true))
            .map_err(config_error)?
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)
    }

    /// Validated listening address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address.parse().map_err(|e| {
            SnippetError::Config(format!(
                "Invalid bind address {:?}: {}",
                self.bind_address, e
            ))
        })
    }

    /// Cap applied to `GET /snippets`. The in-memory list is returned whole.
    pub fn list_limit(&self) -> Option<usize> {
        match self.store {
            StoreKind::Memory => None,
            StoreKind::Sqlite => Some(self.list_limit),
        }
    }
}

fn config_error(e: config::ConfigError) -> SnippetError {
    SnippetError::Config(e.to_string())
}
