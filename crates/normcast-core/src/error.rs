//! Error types for the normcast core library
//!
//! This module defines the error handling system for normcast, using
//! thiserror for ergonomic error definitions and anyhow for opaque sources.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for normalization operations
#[derive(Error, Debug)]
pub enum Error {
    /// A registered field validator rejected a value in strict mode
    #[error("Validation failed for field '{field}': {message}")]
    Validation { field: String, message: String },

    /// Whole-result schema validation failed, or the schema backend itself
    /// broke, in strict mode
    #[error("Schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The engine was invoked with unusable input or configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Policy governing how field and schema validation failures are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Failures are silently dropped; the result still carries the value
    #[default]
    None,
    /// Every failure is recorded per field; normalization always completes
    Collect,
    /// The first failure aborts the entire call; no partial result
    Strict,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::None => write!(f, "none"),
            ValidationMode::Collect => write!(f, "collect"),
            ValidationMode::Strict => write!(f, "strict"),
        }
    }
}
