//! Error-message resolution
//!
//! Messages come either from a language-keyed table (a JSON object) or
//! from a caller-supplied formatting function. Resolution is best-effort:
//! `None` means nothing matched, and callers substitute a generic message.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// What kind of failure a message describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Invalid,
    Required,
    Schema,
}

impl MessageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCategory::Invalid => "invalid",
            MessageCategory::Required => "required",
            MessageCategory::Schema => "schema",
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to a formatter-style message source
pub struct MessageRequest<'a> {
    pub key: &'a str,
    pub category: MessageCategory,
    pub value: &'a Value,
    pub language: &'a str,
}

/// Where messages come from
#[derive(Clone)]
pub enum MessageSource {
    /// A JSON object, either flat (`"email.invalid": "..."`) or keyed by
    /// language tag with flat objects underneath
    Table(Value),
    /// A function invoked per failure; its return value is used directly
    Formatter(Arc<dyn Fn(&MessageRequest<'_>) -> String + Send + Sync>),
}

impl MessageSource {
    pub fn table(table: Value) -> Self {
        Self::Table(table)
    }

    pub fn formatter<F>(f: F) -> Self
    where
        F: Fn(&MessageRequest<'_>) -> String + Send + Sync + 'static,
    {
        Self::Formatter(Arc::new(f))
    }
}

/// Resolve a message for a failed field.
///
/// Table lookup order: the active language bucket, then the `"en"` bucket,
/// then the table itself; within the selected bucket, the composite
/// `"<key>.<category>"` code first, then the bare field key. Only string
/// entries resolve.
pub fn resolve_message(
    key: &str,
    category: MessageCategory,
    value: &Value,
    source: Option<&MessageSource>,
    language: &str,
) -> Option<String> {
    let source = source?;

    match source {
        MessageSource::Formatter(f) => Some(f(&MessageRequest {
            key,
            category,
            value,
            language,
        })),
        MessageSource::Table(table) => {
            let bucket = table
                .get(language)
                .filter(|v| v.is_object())
                .or_else(|| table.get("en").filter(|v| v.is_object()))
                .unwrap_or(table);

            let code = format!("{key}.{category}");
            bucket
                .get(&code)
                .and_then(Value::as_str)
                .or_else(|| bucket.get(key).and_then(Value::as_str))
                .map(String::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> MessageSource {
        MessageSource::table(json!({
            "en": { "email.invalid": "Invalid email address", "email": "Problem with email" },
            "fr": { "email.invalid": "Adresse email invalide" }
        }))
    }

    #[test]
    fn test_active_language_bucket() {
        let msg = resolve_message("email", MessageCategory::Invalid, &json!("bad"), Some(&table()), "fr");
        assert_eq!(msg.as_deref(), Some("Adresse email invalide"));
    }

    #[test]
    fn test_falls_back_to_english_bucket() {
        let msg = resolve_message("email", MessageCategory::Invalid, &json!("bad"), Some(&table()), "de");
        assert_eq!(msg.as_deref(), Some("Invalid email address"));
    }

    #[test]
    fn test_flat_table_fallback() {
        let flat = MessageSource::table(json!({ "email.invalid": "Bad email" }));
        let msg = resolve_message("email", MessageCategory::Invalid, &json!("bad"), Some(&flat), "en");
        assert_eq!(msg.as_deref(), Some("Bad email"));
    }

    #[test]
    fn test_bare_key_fallback_within_bucket() {
        let msg = resolve_message("email", MessageCategory::Schema, &json!("bad"), Some(&table()), "en");
        assert_eq!(msg.as_deref(), Some("Problem with email"));
    }

    #[test]
    fn test_unresolved_returns_none() {
        let msg = resolve_message("age", MessageCategory::Invalid, &json!(5), Some(&table()), "en");
        assert_eq!(msg, None);
        assert_eq!(
            resolve_message("age", MessageCategory::Invalid, &json!(5), None, "en"),
            None
        );
    }

    #[test]
    fn test_formatter_source() {
        let source = MessageSource::formatter(|req| {
            format!("{} is {} ({})", req.key, req.category, req.language)
        });
        let msg = resolve_message("email", MessageCategory::Invalid, &json!("bad"), Some(&source), "fr");
        assert_eq!(msg.as_deref(), Some("email is invalid (fr)"));
    }
}
