//! Normcast Core - normalization engine for string-heavy input
//!
//! This crate turns loosely-typed, string-heavy input (query parameters,
//! form fields, decoded JSON) into strongly-typed structured data through a
//! configurable per-field pipeline.
//!
//! # Main Components
//!
//! - **Scalar coercion**: boolean/null/number/date/JSON inference with
//!   per-type override hooks
//! - **Field pipeline**: transformation, fallback, validation, defaults,
//!   omission, in a fixed order
//! - **Validation modes**: `none`, `collect` (per-field error map), and
//!   `strict` (first failure aborts)
//! - **Plugins**: lifecycle observers with an explicit registry
//! - **Schema pass**: whole-result validation via `normcast-schemas`
//!
//! # Example
//!
//! ```
//! use normcast_core::{normalize, NormalizerOptions};
//! use serde_json::json;
//!
//! let outcome = normalize(
//!     &json!({"active": "true", "score": "99", "tags": "[\"a\",\"b\"]"}),
//!     NormalizerOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(outcome.result, json!({"active": true, "score": 99, "tags": ["a", "b"]}));
//! ```

pub mod coerce;
pub mod engine;
pub mod error;
pub mod messages;
pub mod options;
pub mod plugins;
pub mod validators;

// Re-export main types for convenience
pub use coerce::parse_value;
pub use engine::{normalize, InputNormalizer, NormalizationResult};
pub use error::{Error, Result, ValidationMode};
pub use messages::{resolve_message, MessageCategory, MessageRequest, MessageSource};
pub use options::{
    EmptyStringPolicy, FallbackFn, FieldParsers, NormalizerOptions, TransformFn, ValidatorFn,
};
pub use plugins::{
    AfterFieldEvent, AfterNormalizeEvent, AuditEntry, AuditTrailPlugin, BeforeFieldEvent,
    LoggerPlugin, NormalizerPlugin, PluginRegistry, SanitizerPlugin, ValidationErrorEvent,
};
pub use validators::{
    create_email_validator, create_password_validator, create_phone_validator,
    create_username_validator, PasswordRules, PhoneRules, UsernameRules,
};

// Re-export the schema backend surface so engine users rarely need the
// schemas crate directly.
pub use normcast_schemas::{CustomValidator, SchemaBackend, SchemaError, ValidationOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::Configuration {
            message: "Test error".to_string(),
        };
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_validation_mode_equality() {
        assert_eq!(ValidationMode::Strict, ValidationMode::Strict);
        assert_ne!(ValidationMode::Strict, ValidationMode::Collect);
    }
}
