// src/config.rs
//! Configuration file parsing
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address, CORS origins
//! - [storage] - Database location
//! - [calculator] - Factor file and history defaults

use crate::factors::FactorTable;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Number of records returned by history when no limit is given
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct CarbonConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSection,

    /// Calculator settings
    #[serde(default)]
    pub calculator: CalculatorSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// HTTP bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Allowed CORS origins (empty = any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

/// Storage configuration section
#[derive(Debug, Deserialize)]
pub struct StorageSection {
    /// SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("carbon.db")
}

/// Calculator configuration section
#[derive(Debug, Deserialize)]
pub struct CalculatorSection {
    /// Optional TOML factor file replacing the built-in table
    #[serde(default)]
    pub factors_file: Option<PathBuf>,

    /// Default number of history records
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl Default for CalculatorSection {
    fn default() -> Self {
        Self {
            factors_file: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn default_history_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

impl CarbonConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CarbonConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.calculator.history_limit == 0 {
            anyhow::bail!("calculator.history_limit must be at least 1");
        }

        Ok(())
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))
    }

    /// Build the factor table: the configured file, or the built-in table
    pub fn factor_table(&self) -> Result<FactorTable> {
        match &self.calculator.factors_file {
            Some(path) => FactorTable::load(path)
                .with_context(|| format!("Failed to load factor file: {}", path.display())),
            None => Ok(FactorTable::builtin()),
        }
    }

    /// Convert to the runtime server configuration
    #[cfg(feature = "server")]
    pub fn to_server_config(&self) -> Result<crate::server::ServerConfig> {
        Ok(crate::server::ServerConfig {
            bind_addr: self.bind_addr()?,
            db_path: self.storage.db_path.clone(),
            cors_allowed_origins: self.server.cors_origins.clone(),
            history_limit: self.calculator.history_limit,
        })
    }
}
