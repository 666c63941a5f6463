//! The normalization engine
//!
//! [`InputNormalizer`] owns an immutable configuration plus a plugin
//! snapshot and can normalize any number of inputs. Each call clones the
//! configuration into a working copy; nested objects are processed by full
//! recursive re-entry over a fresh clone of that working copy, so a plugin
//! mutation is always scoped to the pass that made it.
//!
//! Per-field processing order: filter, before-field hook, transform,
//! coerce/recurse, field-level schema fallback, validate, default
//! substitution, undefined omission, commit, after-field hook. After the
//! field loop, an optional whole-result schema pass runs, then the
//! after-normalize hook.

use crate::coerce::parse_value;
use crate::error::{Error, Result, ValidationMode};
use crate::messages::{resolve_message, MessageCategory};
use crate::options::NormalizerOptions;
use crate::plugins::{
    AfterFieldEvent, AfterNormalizeEvent, BeforeFieldEvent, NormalizerPlugin, PluginRegistry,
    ValidationErrorEvent,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of a normalization call
///
/// `errors` is present only when the mode is `Collect` and at least one
/// field failed; the result still carries an entry for every failing
/// field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationResult {
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Reusable normalization engine
pub struct InputNormalizer {
    options: NormalizerOptions,
    plugins: Vec<Arc<dyn NormalizerPlugin>>,
}

impl InputNormalizer {
    /// Create an engine with no plugins attached
    pub fn new(options: NormalizerOptions) -> Self {
        Self {
            options,
            plugins: Vec::new(),
        }
    }

    /// Attach the plugins of a registry, ahead of any per-engine plugins
    ///
    /// The registry is consulted exactly once, here; later registrations
    /// do not reach an already-constructed engine.
    pub fn with_registry(mut self, registry: &PluginRegistry) -> Self {
        let mut plugins = registry.get_all();
        plugins.append(&mut self.plugins);
        self.plugins = plugins;
        self
    }

    /// Attach a single per-engine plugin
    pub fn with_plugin(mut self, plugin: Arc<dyn NormalizerPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Switch the active message language for subsequent calls
    pub fn set_language<L: Into<String>>(&mut self, language: L) {
        self.options.language = language.into();
    }

    /// Normalize one input document
    ///
    /// The root must be a JSON object. In `Strict` mode the first
    /// validation failure aborts with `Err` and no partial result.
    pub fn normalize(&self, input: &Value) -> Result<NormalizationResult> {
        let Some(map) = input.as_object() else {
            return Err(Error::Configuration {
                message: "normalize expects a JSON object at the top level".to_string(),
            });
        };

        let mut options = self.options.clone();
        let (result, errors) = self.run_pass(map, &mut options)?;

        let errors = (options.validation_mode == ValidationMode::Collect && !errors.is_empty())
            .then_some(errors);
        Ok(NormalizationResult {
            result: Value::Object(result),
            errors,
        })
    }

    /// One full pass: field loop, schema pass, after-normalize hook.
    ///
    /// Nested objects re-enter here with their own options clone; their
    /// error maps stay with the nested pass (flattening is the caller's
    /// concern), but a strict abort propagates.
    fn run_pass(
        &self,
        input: &Map<String, Value>,
        options: &mut NormalizerOptions,
    ) -> Result<(Map<String, Value>, BTreeMap<String, String>)> {
        let mut result = Map::new();
        let mut errors: BTreeMap<String, String> = BTreeMap::new();

        for (key, raw) in input {
            if let Some(whitelist) = &options.whitelist {
                if !whitelist.iter().any(|k| k == key) {
                    continue;
                }
            }
            if let Some(blacklist) = &options.blacklist {
                if blacklist.iter().any(|k| k == key) {
                    continue;
                }
            }

            {
                let mut event = BeforeFieldEvent {
                    key,
                    raw_value: raw,
                    options: &mut *options,
                };
                for plugin in &self.plugins {
                    plugin.before_field_normalize(&mut event);
                }
            }

            let transformed = match options.field_transformers.get(key.as_str()) {
                Some(transform) => transform(raw.clone()),
                None => raw.clone(),
            };

            let mut current = self.coerce_or_recurse(key, transformed, options)?;

            // Field-level fallback runs unconditionally; the undefined
            // sentinel is projected to null before the fallback sees it.
            if let Some(fallback) = options.schema_fallbacks.get(key.as_str()) {
                current = Some(fallback(current.unwrap_or(Value::Null)));
            }

            if let Some(validator) = options.validators.get(key.as_str()) {
                let candidate = current.clone().unwrap_or(Value::Null);
                if !validator(&candidate) {
                    let message = resolve_message(
                        key,
                        MessageCategory::Invalid,
                        &candidate,
                        options.messages.as_ref(),
                        &options.language,
                    )
                    .unwrap_or_else(|| format!("Validation failed for field \"{key}\""));

                    match options.validation_mode {
                        ValidationMode::Strict => {
                            return Err(Error::Validation {
                                field: key.clone(),
                                message,
                            });
                        }
                        ValidationMode::Collect => {
                            errors.insert(key.clone(), message.clone());
                            let event = ValidationErrorEvent {
                                key,
                                error: &message,
                                current_value: &candidate,
                            };
                            for plugin in &self.plugins {
                                plugin.on_validation_error(&event);
                            }
                        }
                        ValidationMode::None => {}
                    }
                }
            }

            if matches!(current, None | Some(Value::Null)) {
                if let Some(default) = options.default_values.get(key.as_str()) {
                    current = Some(default.clone());
                }
            }

            let committed = match current {
                None if options.remove_undefined_fields => continue,
                None => Value::Null,
                Some(value) => value,
            };

            result.insert(key.clone(), committed.clone());

            let mut event = AfterFieldEvent {
                key,
                normalized_value: &committed,
                raw_value: raw,
                result: &mut result,
            };
            for plugin in &self.plugins {
                plugin.after_field_normalize(&mut event);
            }
        }

        if let Some(schema) = options.schema.clone() {
            let snapshot = Value::Object(result.clone());
            match normcast_schemas::validate(&snapshot, schema.as_ref()) {
                Ok(issues) => {
                    if !issues.is_empty() {
                        self.handle_schema_errors(&issues, &mut errors, &mut result, options)?;
                    }
                }
                Err(err) if options.validation_mode == ValidationMode::Strict => {
                    return Err(Error::SchemaValidation {
                        message: err.to_string(),
                        source: Some(err.into()),
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "schema backend failed outside strict mode; result left unvalidated");
                }
            }
        }

        let event = AfterNormalizeEvent {
            result: &result,
            errors: &errors,
        };
        for plugin in &self.plugins {
            plugin.after_normalize(&event);
        }

        Ok((result, errors))
    }

    /// Arrays map element-wise: object elements re-enter the engine over a
    /// scoped options clone, primitives go through the scalar coercer.
    fn coerce_or_recurse(
        &self,
        key: &str,
        value: Value,
        options: &mut NormalizerOptions,
    ) -> Result<Option<Value>> {
        match value {
            Value::Array(items) => {
                let mut normalized = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(nested) => {
                            let mut scoped = options.clone();
                            let (nested_result, _nested_errors) =
                                self.run_pass(&nested, &mut scoped)?;
                            normalized.push(Value::Object(nested_result));
                        }
                        other => normalized
                            .push(parse_value(&other, Some(key), options).unwrap_or(Value::Null)),
                    }
                }
                Ok(Some(Value::Array(normalized)))
            }
            Value::Object(nested) => {
                let mut scoped = options.clone();
                let (nested_result, _nested_errors) = self.run_pass(&nested, &mut scoped)?;
                Ok(Some(Value::Object(nested_result)))
            }
            other => Ok(parse_value(&other, Some(key), options)),
        }
    }

    /// Second-pass error handling for fields the whole-result schema
    /// flagged. The schema fallback re-applies here, superseding the
    /// field-level application, and only in `Collect` mode.
    fn handle_schema_errors(
        &self,
        issues: &BTreeMap<String, String>,
        errors: &mut BTreeMap<String, String>,
        result: &mut Map<String, Value>,
        options: &NormalizerOptions,
    ) -> Result<()> {
        match options.validation_mode {
            ValidationMode::Strict => {
                let summary = issues
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(Error::SchemaValidation {
                    message: summary,
                    source: None,
                })
            }
            ValidationMode::Collect => {
                for field in issues.keys() {
                    let value = result.get(field).cloned().unwrap_or(Value::Null);
                    let message = resolve_message(
                        field,
                        MessageCategory::Schema,
                        &value,
                        options.messages.as_ref(),
                        &options.language,
                    )
                    .unwrap_or_else(|| format!("Schema validation failed for field \"{field}\""));

                    errors.insert(field.clone(), message.clone());

                    let event = ValidationErrorEvent {
                        key: field,
                        error: &message,
                        current_value: &value,
                    };
                    for plugin in &self.plugins {
                        plugin.on_validation_error(&event);
                    }

                    if let Some(fallback) = options.schema_fallbacks.get(field.as_str()) {
                        let current = result.get(field).cloned().unwrap_or(Value::Null);
                        result.insert(field.clone(), fallback(current));
                    }
                }
                Ok(())
            }
            ValidationMode::None => Ok(()),
        }
    }
}

/// One-shot functional entry point: construct a fresh engine and run it
pub fn normalize(input: &Value, options: NormalizerOptions) -> Result<NormalizationResult> {
    InputNormalizer::new(options).normalize(input)
}
