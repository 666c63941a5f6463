//! Schema backend dispatch
//!
//! The engine never talks to a validator library directly. It hands the
//! committed result map to [`validate`], which dispatches on the
//! [`SchemaBackend`] variant and reduces whatever the backend reports into
//! one `field path -> message` mapping. Adding a new validator library means
//! adding a variant here plus one handler function, nothing else.

use crate::error::SchemaError;
use jsonschema::output::BasicOutput;
use jsonschema::Validator;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of a [`CustomValidator`] invocation
///
/// `errors` is consulted only when `valid` is false.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationOutcome {
    /// A passing outcome with no recorded issues
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }

    /// A failing outcome carrying the given field issues
    pub fn invalid(errors: BTreeMap<String, String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

/// User-supplied whole-result validator
///
/// Implementations report structural problems with the normalized result as
/// a `field path -> message` mapping. Returning `Err` signals an internal
/// failure of the validator itself, which the engine treats separately from
/// a validation failure.
pub trait CustomValidator: Send + Sync {
    fn validate(&self, result: &Value) -> Result<ValidationOutcome, SchemaError>;
}

/// The three supported whole-result validation backends
pub enum SchemaBackend {
    /// Compiled JSON Schema evaluated with full error iteration
    JsonSchema(Validator),
    /// Compiled JSON Schema evaluated through the draft "basic" output format
    BasicOutput(Validator),
    /// User-supplied validator object
    Custom(Arc<dyn CustomValidator>),
}

impl std::fmt::Debug for SchemaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaBackend::JsonSchema(_) => f.write_str("SchemaBackend::JsonSchema"),
            SchemaBackend::BasicOutput(_) => f.write_str("SchemaBackend::BasicOutput"),
            SchemaBackend::Custom(_) => f.write_str("SchemaBackend::Custom"),
        }
    }
}

impl SchemaBackend {
    /// Compile a JSON Schema document into the error-iteration backend
    pub fn json_schema(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::compile(e.to_string()))?;
        Ok(Self::JsonSchema(validator))
    }

    /// Compile a JSON Schema document into the basic-output backend
    pub fn basic_output(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::compile(e.to_string()))?;
        Ok(Self::BasicOutput(validator))
    }

    /// Wrap a user-supplied validator
    pub fn custom(validator: Arc<dyn CustomValidator>) -> Self {
        Self::Custom(validator)
    }
}

/// Validate a normalized result against the configured backend
///
/// Returns the reduced `field path -> message` mapping; an empty mapping
/// means the result passed. `Err` is reserved for internal backend failures
/// (the engine decides whether those abort or are absorbed).
pub fn validate(
    result: &Value,
    backend: &SchemaBackend,
) -> Result<BTreeMap<String, String>, SchemaError> {
    match backend {
        SchemaBackend::JsonSchema(validator) => Ok(check_json_schema(result, validator)),
        SchemaBackend::BasicOutput(validator) => Ok(check_basic_output(result, validator)),
        SchemaBackend::Custom(validator) => check_custom(result, validator.as_ref()),
    }
}

/// Full error iteration: every issue contributes an entry, last write wins
/// per path.
fn check_json_schema(result: &Value, validator: &Validator) -> BTreeMap<String, String> {
    let mut issues = BTreeMap::new();
    for error in validator.iter_errors(result) {
        let path = dotted_path(&error.instance_path.to_string());
        issues.insert(path, error.to_string());
    }
    issues
}

/// Draft "basic" output format: output units are reduced into the mapping,
/// last write wins per path.
fn check_basic_output(result: &Value, validator: &Validator) -> BTreeMap<String, String> {
    let mut issues = BTreeMap::new();
    if let BasicOutput::Invalid(units) = validator.apply(result).basic() {
        for unit in units {
            let path = dotted_path(&unit.instance_location().to_string());
            issues.insert(path, unit.error_description().to_string());
        }
    }
    issues
}

fn check_custom(
    result: &Value,
    validator: &dyn CustomValidator,
) -> Result<BTreeMap<String, String>, SchemaError> {
    let outcome = validator.validate(result)?;
    if outcome.valid {
        Ok(BTreeMap::new())
    } else {
        Ok(outcome.errors)
    }
}

/// Convert a JSON Pointer (`/profile/dob`) into the dotted form the engine
/// keys errors by (`profile.dob`). Root-level issues key on the empty
/// string.
fn dotted_path(pointer: &str) -> String {
    pointer.trim_start_matches('/').replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "age": { "type": "integer", "minimum": 0 },
                "profile": {
                    "type": "object",
                    "properties": {
                        "email": { "type": "string", "pattern": "@" }
                    }
                }
            },
            "required": ["age"]
        })
    }

    #[test]
    fn test_dotted_path() {
        assert_eq!(dotted_path("/profile/dob"), "profile.dob");
        assert_eq!(dotted_path("/age"), "age");
        assert_eq!(dotted_path(""), "");
    }

    #[test]
    fn test_json_schema_backend_flags_nested_paths() {
        let backend = SchemaBackend::json_schema(&person_schema()).unwrap();
        let issues = validate(
            &json!({"age": -3, "profile": {"email": "nope"}}),
            &backend,
        )
        .unwrap();

        assert!(issues.contains_key("age"));
        assert!(issues.contains_key("profile.email"));
    }

    #[test]
    fn test_json_schema_backend_passes_valid_input() {
        let backend = SchemaBackend::json_schema(&person_schema()).unwrap();
        let issues = validate(
            &json!({"age": 30, "profile": {"email": "a@b.c"}}),
            &backend,
        )
        .unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_basic_output_backend_flags_same_fields() {
        let backend = SchemaBackend::basic_output(&person_schema()).unwrap();
        let issues = validate(&json!({"age": -3}), &backend).unwrap();
        assert!(issues.contains_key("age"));
    }

    #[test]
    fn test_missing_required_keys_on_root() {
        let backend = SchemaBackend::json_schema(&person_schema()).unwrap();
        let issues = validate(&json!({}), &backend).unwrap();
        assert!(issues.contains_key(""));
    }

    #[test]
    fn test_compile_failure() {
        let err = SchemaBackend::json_schema(&json!({"type": "no-such-type"})).unwrap_err();
        assert!(matches!(err, SchemaError::Compile { .. }));
    }

    struct RangeCheck;

    impl CustomValidator for RangeCheck {
        fn validate(&self, result: &Value) -> Result<ValidationOutcome, SchemaError> {
            let mut errors = BTreeMap::new();
            if let Some(age) = result.get("age").and_then(Value::as_i64) {
                if age > 150 {
                    errors.insert("age".to_string(), "age out of range".to_string());
                }
            }
            if errors.is_empty() {
                Ok(ValidationOutcome::valid())
            } else {
                Ok(ValidationOutcome::invalid(errors))
            }
        }
    }

    #[test]
    fn test_custom_backend() {
        let backend = SchemaBackend::custom(Arc::new(RangeCheck));
        let issues = validate(&json!({"age": 200}), &backend).unwrap();
        assert_eq!(issues.get("age").map(String::as_str), Some("age out of range"));

        let issues = validate(&json!({"age": 30}), &backend).unwrap();
        assert!(issues.is_empty());
    }

    struct Broken;

    impl CustomValidator for Broken {
        fn validate(&self, _result: &Value) -> Result<ValidationOutcome, SchemaError> {
            Err(SchemaError::backend("validator blew up"))
        }
    }

    #[test]
    fn test_custom_backend_internal_failure() {
        let backend = SchemaBackend::custom(Arc::new(Broken));
        let err = validate(&json!({}), &backend).unwrap_err();
        assert!(matches!(err, SchemaError::Backend { .. }));
    }
}
