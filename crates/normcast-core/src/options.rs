//! Per-call configuration bundle for the normalization engine
//!
//! An [`NormalizerOptions`] value is assembled once (usually through the
//! fluent `with_*` methods), handed to an engine, and treated as immutable
//! for the lifetime of that engine. The engine clones it into a mutable
//! working copy for each normalization pass, which is what allows the
//! sanctioned plugin mutation of the transformer map to stay scoped to a
//! single pass.

use crate::error::ValidationMode;
use crate::messages::MessageSource;
use chrono::{DateTime, Utc};
use normcast_schemas::SchemaBackend;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-field raw-value transformer, applied before coercion
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Per-field substitute applied after coercion, and again when the
/// whole-result schema flags the field
pub type FallbackFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Per-field predicate; `true` means the coerced value is acceptable
pub type ValidatorFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What to do with a string that trims to empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyStringPolicy {
    /// Replace with JSON null
    #[default]
    Null,
    /// Replace with the undefined sentinel (field is dropped under
    /// `remove_undefined_fields`, committed as null otherwise)
    Undefined,
    /// Keep the original, untrimmed string
    Keep,
}

/// Per-type override hooks applied after coercion
///
/// Each hook receives the value the coercer produced for its type and
/// returns the final `Value` to carry forward. Absent hooks keep the
/// coercer's output.
#[derive(Clone, Default)]
pub struct FieldParsers {
    pub string: Option<Arc<dyn Fn(&str) -> Value + Send + Sync>>,
    pub number: Option<Arc<dyn Fn(f64) -> Value + Send + Sync>>,
    pub boolean: Option<Arc<dyn Fn(bool) -> Value + Send + Sync>>,
    pub date: Option<Arc<dyn Fn(DateTime<Utc>) -> Value + Send + Sync>>,
}

impl FieldParsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.string = Some(Arc::new(f));
        self
    }

    pub fn with_number<F>(mut self, f: F) -> Self
    where
        F: Fn(f64) -> Value + Send + Sync + 'static,
    {
        self.number = Some(Arc::new(f));
        self
    }

    pub fn with_boolean<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) -> Value + Send + Sync + 'static,
    {
        self.boolean = Some(Arc::new(f));
        self
    }

    pub fn with_date<F>(mut self, f: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> Value + Send + Sync + 'static,
    {
        self.date = Some(Arc::new(f));
        self
    }
}

/// Configuration bundle for one engine (or one one-shot call)
///
/// Cloning is cheap: every closure is behind an `Arc`.
#[derive(Clone)]
pub struct NormalizerOptions {
    pub treat_empty_string_as: EmptyStringPolicy,
    pub remove_undefined_fields: bool,
    pub enable_date_parsing: bool,
    pub enable_json_parsing: bool,
    pub convert_numbers: bool,
    pub convert_booleans: bool,
    pub convert_nulls: bool,

    /// Restrict processing to these keys (`None` = no restriction)
    pub whitelist: Option<Vec<String>>,
    /// Remove these keys from processing (`None` = no restriction)
    pub blacklist: Option<Vec<String>>,

    pub field_transformers: HashMap<String, TransformFn>,
    pub field_parsers: FieldParsers,

    /// Substituted when the post-coercion value is null or undefined
    pub default_values: HashMap<String, Value>,
    pub schema_fallbacks: HashMap<String, FallbackFn>,
    pub validators: HashMap<String, ValidatorFn>,

    pub validation_mode: ValidationMode,

    /// Optional whole-result schema, run after the per-field pipeline
    pub schema: Option<Arc<SchemaBackend>>,

    pub messages: Option<MessageSource>,
    /// Active language tag for message resolution
    pub language: String,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            treat_empty_string_as: EmptyStringPolicy::Null,
            remove_undefined_fields: false,
            enable_date_parsing: true,
            enable_json_parsing: true,
            convert_numbers: true,
            convert_booleans: true,
            convert_nulls: true,
            whitelist: None,
            blacklist: None,
            field_transformers: HashMap::new(),
            field_parsers: FieldParsers::default(),
            default_values: HashMap::new(),
            schema_fallbacks: HashMap::new(),
            validators: HashMap::new(),
            validation_mode: ValidationMode::None,
            schema: None,
            messages: None,
            language: "en".to_string(),
        }
    }
}

impl NormalizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_string_policy(mut self, policy: EmptyStringPolicy) -> Self {
        self.treat_empty_string_as = policy;
        self
    }

    pub fn with_remove_undefined_fields(mut self, enabled: bool) -> Self {
        self.remove_undefined_fields = enabled;
        self
    }

    pub fn with_date_parsing(mut self, enabled: bool) -> Self {
        self.enable_date_parsing = enabled;
        self
    }

    pub fn with_json_parsing(mut self, enabled: bool) -> Self {
        self.enable_json_parsing = enabled;
        self
    }

    pub fn with_number_conversion(mut self, enabled: bool) -> Self {
        self.convert_numbers = enabled;
        self
    }

    pub fn with_boolean_conversion(mut self, enabled: bool) -> Self {
        self.convert_booleans = enabled;
        self
    }

    pub fn with_null_conversion(mut self, enabled: bool) -> Self {
        self.convert_nulls = enabled;
        self
    }

    pub fn with_whitelist<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_blacklist<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Register a raw-value transformer for a field
    pub fn with_transformer<K, F>(mut self, key: K, f: F) -> Self
    where
        K: Into<String>,
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.field_transformers.insert(key.into(), Arc::new(f));
        self
    }

    pub fn with_field_parsers(mut self, parsers: FieldParsers) -> Self {
        self.field_parsers = parsers;
        self
    }

    /// Register a default substituted when the field coerces to
    /// null/undefined
    pub fn with_default_value<K>(mut self, key: K, value: Value) -> Self
    where
        K: Into<String>,
    {
        self.default_values.insert(key.into(), value);
        self
    }

    /// Register a schema fallback for a field
    pub fn with_schema_fallback<K, F>(mut self, key: K, f: F) -> Self
    where
        K: Into<String>,
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.schema_fallbacks.insert(key.into(), Arc::new(f));
        self
    }

    /// Register a validator predicate for a field
    pub fn with_validator<K, F>(mut self, key: K, f: F) -> Self
    where
        K: Into<String>,
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validators.insert(key.into(), Arc::new(f));
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_schema(mut self, schema: SchemaBackend) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    pub fn with_messages(mut self, messages: MessageSource) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_language<L: Into<String>>(mut self, language: L) -> Self {
        self.language = language.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_documented_values() {
        let options = NormalizerOptions::default();
        assert_eq!(options.treat_empty_string_as, EmptyStringPolicy::Null);
        assert!(!options.remove_undefined_fields);
        assert!(options.enable_date_parsing);
        assert!(options.enable_json_parsing);
        assert!(options.convert_numbers);
        assert!(options.convert_booleans);
        assert!(options.convert_nulls);
        assert!(options.whitelist.is_none());
        assert!(options.blacklist.is_none());
        assert_eq!(options.validation_mode, ValidationMode::None);
        assert_eq!(options.language, "en");
    }

    #[test]
    fn test_builder_registers_field_entries() {
        let options = NormalizerOptions::new()
            .with_transformer("email", |v| v)
            .with_default_value("country", json!("RW"))
            .with_validator("age", |v| v.is_number())
            .with_schema_fallback("age", |v| v);

        assert!(options.field_transformers.contains_key("email"));
        assert_eq!(options.default_values.get("country"), Some(&json!("RW")));
        assert!(options.validators.contains_key("age"));
        assert!(options.schema_fallbacks.contains_key("age"));
    }

    #[test]
    fn test_clone_shares_closures() {
        let options = NormalizerOptions::new().with_transformer("a", |v| v);
        let cloned = options.clone();
        assert!(cloned.field_transformers.contains_key("a"));
    }

    #[test]
    fn test_empty_string_policy_serde() {
        let policy: EmptyStringPolicy = serde_json::from_str("\"undefined\"").unwrap();
        assert_eq!(policy, EmptyStringPolicy::Undefined);
    }
}
