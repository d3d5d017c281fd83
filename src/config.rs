//! Environment-driven configuration
//!
//! Values come from the process environment, after loading a `.env` file if
//! one is present:
//! - `DATABASE_URL` (required): sqlx SQLite URL, e.g. `sqlite://featherweight.db?mode=rwc`
//! - `LOG_LEVEL` (default `info`): tracing filter directive
//! - `DB_MAX_CONNECTIONS` (default `5`): pool size, 1 to 64

use std::env;

use crate::error::ConfigError;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const MAX_CONNECTIONS_LIMIT: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub database_url: String,
  pub log_level: String,
  pub max_connections: u32,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_process_env()
  }

  /// Read configuration without touching `.env`
  pub fn from_process_env() -> Result<Self, ConfigError> {
    let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingRequired {
      var: "DATABASE_URL".into(),
    })?;

    if database_url.trim().is_empty() {
      return Err(ConfigError::InvalidValue {
        var: "DATABASE_URL".into(),
        reason: "must not be empty".into(),
      });
    }

    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

    let max_connections = match env::var("DB_MAX_CONNECTIONS") {
      Ok(raw) => parse_max_connections(&raw)?,
      Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    Ok(Self {
      database_url,
      log_level,
      max_connections,
    })
  }
}

fn parse_max_connections(raw: &str) -> Result<u32, ConfigError> {
  let value: u32 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
    var: "DB_MAX_CONNECTIONS".into(),
    reason: format!("'{}' is not a positive integer", raw),
  })?;

  if value == 0 || value > MAX_CONNECTIONS_LIMIT {
    return Err(ConfigError::InvalidValue {
      var: "DB_MAX_CONNECTIONS".into(),
      reason: format!("must be between 1 and {}", MAX_CONNECTIONS_LIMIT),
    });
  }

  Ok(value)
}
