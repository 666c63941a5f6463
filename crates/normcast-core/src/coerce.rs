//! Scalar coercion
//!
//! [`parse_value`] turns a single string into its inferred runtime type.
//! Precedence is fixed and significant: boolean, null/undefined, number,
//! date, JSON, string fallback. The literal `"true"` is also valid JSON,
//! so reordering these branches changes observable behavior.

use crate::options::{EmptyStringPolicy, NormalizerOptions};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

static ISO_DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?Z$").expect("valid datetime pattern")
});

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

/// Coerce a single value according to the configured conversions.
///
/// Non-strings pass through unchanged. `None` is the undefined sentinel:
/// the caller decides whether it becomes an omitted field or a committed
/// null. `key` is the owning field, if any, and only feeds diagnostics.
pub fn parse_value(value: &Value, key: Option<&str>, options: &NormalizerOptions) -> Option<Value> {
    let Value::String(raw) = value else {
        return Some(value.clone());
    };

    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();

    if trimmed.is_empty() {
        return match options.treat_empty_string_as {
            EmptyStringPolicy::Null => Some(Value::Null),
            EmptyStringPolicy::Undefined => None,
            EmptyStringPolicy::Keep => Some(value.clone()),
        };
    }

    if options.convert_booleans {
        if lowered == "true" {
            return Some(apply_boolean(true, options));
        }
        if lowered == "false" {
            return Some(apply_boolean(false, options));
        }
    }

    // No override hook on this branch: the sentinels are returned directly.
    if options.convert_nulls {
        if lowered == "null" {
            return Some(Value::Null);
        }
        if lowered == "undefined" {
            return None;
        }
    }

    if options.convert_numbers {
        if let Some(number) = parse_number(trimmed) {
            return Some(match &options.field_parsers.number {
                Some(hook) => hook(number.as_f64().unwrap_or_default()),
                None => Value::Number(number),
            });
        }
    }

    if options.enable_date_parsing && looks_like_iso_date(trimmed) {
        match parse_iso_date(trimmed) {
            Some(date) => {
                return Some(match &options.field_parsers.date {
                    Some(hook) => hook(date),
                    None => Value::String(date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
                });
            }
            None => {
                tracing::trace!(field = ?key, value = %trimmed, "date-shaped value failed to parse");
            }
        }
    }

    if options.enable_json_parsing {
        if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
            return Some(parsed);
        }
    }

    Some(match &options.field_parsers.string {
        Some(hook) => hook(trimmed),
        None => Value::String(trimmed.to_string()),
    })
}

fn apply_boolean(flag: bool, options: &NormalizerOptions) -> Value {
    match &options.field_parsers.boolean {
        Some(hook) => hook(flag),
        None => Value::Bool(flag),
    }
}

/// Numeric-string detection with the host's parsing rules. Integer forms
/// stay integers; non-finite parses ("inf", "nan") are not numbers.
fn parse_number(trimmed: &str) -> Option<Number> {
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return Number::from_f64(n);
    }
    None
}

fn looks_like_iso_date(trimmed: &str) -> bool {
    ISO_DATETIME_RE.is_match(trimmed) || ISO_DATE_RE.is_match(trimmed)
}

fn parse_iso_date(trimmed: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
