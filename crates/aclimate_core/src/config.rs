//! Process configuration for the core.
//!
//! # Responsibility
//! - Resolve the database location and logging options from the environment.
//! - Load an optional `.env` file before reading variables.
//!
//! # Invariants
//! - A config is only produced when `DATABASE_URL` names a SQLite location.
//! - Logging stays disabled unless `ACLIMATE_LOG_DIR` is set.

use crate::db::{DatabaseLocation, DbError, DbResult};
use crate::logging::{LogLevel, LoggingConfig, LoggingError};
use log::debug;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const LOG_LEVEL_VAR: &str = "ACLIMATE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ACLIMATE_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    Database(DbError),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "{name} not found in environment variables"),
            Self::Database(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingVar(_) => None,
            Self::Database(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Database(value)
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub database: DatabaseLocation,
    /// `None` when file logging is not configured.
    pub logging: Option<LoggingConfig>,
}

impl CoreConfig {
    /// Loads `.env` (when present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("event=config_load module=config dotenv={}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => debug!("event=config_load module=config status=dotenv_skipped error={err}"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(DATABASE_URL_VAR))?;
        let database = DatabaseLocation::parse(&url)?;

        let logging = match lookup(LOG_DIR_VAR).filter(|value| !value.trim().is_empty()) {
            Some(dir) => {
                let level = match lookup(LOG_LEVEL_VAR) {
                    Some(level) => level.parse()?,
                    None => LogLevel::build_default(),
                };
                Some(LoggingConfig::new(level, &dir)?)
            }
            None => None,
        };

        Ok(Self { database, logging })
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        self.database.open()
    }
}
