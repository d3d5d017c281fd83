//! Error types for data access, summary loading and configuration

use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Data Access Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Malformed stored value: {0}")]
  Decode(String),
}

impl Serialize for DataError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

impl From<sqlx::Error> for DataError {
  fn from(e: sqlx::Error) -> Self {
    DataError::Database(e.to_string())
  }
}

impl From<sqlx::migrate::MigrateError> for DataError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    DataError::Database(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Summary Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
  #[error("Workout not found: {0}")]
  WorkoutNotFound(i64),

  #[error("Failed to load workout summary: {0}")]
  Data(#[from] DataError),
}

impl Serialize for SummaryError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Configuration Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Missing configuration: {var}")]
  MissingRequired { var: String },

  #[error("Invalid value for {var}: {reason}")]
  InvalidValue { var: String, reason: String },
}
