//! String sanitizing plugin

use super::{AfterFieldEvent, BeforeFieldEvent, NormalizerPlugin};
use crate::options::TransformFn;
use serde_json::Value;
use std::sync::Arc;

/// Trims string fields and lowercases email-like fields
///
/// Before coercion it injects a transformer for the current field, wrapping
/// any transformer already registered — the sanctioned lazy-injection
/// pattern. After commit it re-sanitizes string results, which also covers
/// values that only became strings during coercion.
#[derive(Debug, Default, Clone, Copy)]
pub struct SanitizerPlugin;

fn sanitize(s: &str, is_email: bool) -> String {
    let trimmed = s.trim();
    if is_email {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

fn is_email_key(key: &str) -> bool {
    key.to_lowercase().contains("email")
}

impl NormalizerPlugin for SanitizerPlugin {
    fn before_field_normalize(&self, event: &mut BeforeFieldEvent<'_>) {
        if !event.raw_value.is_string() {
            return;
        }

        let is_email = is_email_key(event.key);
        let existing = event.options.field_transformers.get(event.key).cloned();

        let chained: TransformFn = Arc::new(move |value: Value| {
            let value = match &existing {
                Some(f) => f(value),
                None => value,
            };
            match value {
                Value::String(s) => Value::String(sanitize(&s, is_email)),
                other => other,
            }
        });

        event
            .options
            .field_transformers
            .insert(event.key.to_string(), chained);
    }

    fn after_field_normalize(&self, event: &mut AfterFieldEvent<'_>) {
        if let Value::String(s) = event.normalized_value {
            let sanitized = sanitize(s, is_email_key(event.key));
            event
                .result
                .insert(event.key.to_string(), Value::String(sanitized));
        }
    }
}
