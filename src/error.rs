//! Engine error type.
//!
//! Missing data is never an error here - absent history or preferences
//! resolve to defaults at the load boundary. What remains is storage I/O,
//! caller-supplied invariant violations, and state-blob decode failures.

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Invalid date range: {0}")]
  InvalidDateRange(String),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Serialize for EngineError {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

pub type Result<T> = std::result::Result<T, EngineError>;
