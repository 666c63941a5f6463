//! Normcast Schemas - whole-result validation backends
//!
//! This crate provides the schema adapter used by the normalization engine
//! for a second, whole-result validation pass. Three backends are supported
//! behind one tagged union:
//!
//! - **JsonSchema**: a compiled JSON Schema (draft 2020-12) evaluated with
//!   full error iteration
//! - **BasicOutput**: the same compiled schema evaluated through the draft's
//!   "basic" output format
//! - **Custom**: any user-supplied validator implementing [`CustomValidator`]
//!
//! Whatever the backend, a failed validation is reduced to a single mapping
//! from dotted field path to raw message, which is what the engine consumes.
//!
//! ## Quick Start
//!
//! ```
//! use normcast_schemas::{SchemaBackend, validate};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "age": { "type": "integer", "minimum": 0 } },
//!     "required": ["age"]
//! });
//!
//! let backend = SchemaBackend::json_schema(&schema).unwrap();
//! let issues = validate(&json!({"age": -3}), &backend).unwrap();
//! assert!(issues.contains_key("age"));
//! ```

pub mod backend;
pub mod error;

pub use backend::{validate, CustomValidator, SchemaBackend, ValidationOutcome};
pub use error::SchemaError;
