//! Audit-trail plugin

use super::{AfterFieldEvent, AfterNormalizeEvent, NormalizerPlugin};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// One entry in an externally owned audit log
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEntry {
    /// A field whose committed value differs from its raw input
    FieldChanged {
        key: String,
        from: Value,
        to: Value,
    },
    /// Terminal marker appended once per normalization pass
    Completed { timestamp: DateTime<Utc> },
}

/// Records which fields normalization changed
///
/// The log is owned by the caller and shared by reference; the plugin
/// holds no state of its own beyond the handle.
pub struct AuditTrailPlugin {
    log: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditTrailPlugin {
    pub fn new(log: Arc<Mutex<Vec<AuditEntry>>>) -> Self {
        Self { log }
    }
}

impl NormalizerPlugin for AuditTrailPlugin {
    fn after_field_normalize(&self, event: &mut AfterFieldEvent<'_>) {
        if event.normalized_value != event.raw_value {
            if let Ok(mut log) = self.log.lock() {
                log.push(AuditEntry::FieldChanged {
                    key: event.key.to_string(),
                    from: event.raw_value.clone(),
                    to: event.normalized_value.clone(),
                });
            }
        }
    }

    fn after_normalize(&self, _event: &AfterNormalizeEvent<'_>) {
        if let Ok(mut log) = self.log.lock() {
            log.push(AuditEntry::Completed {
                timestamp: Utc::now(),
            });
        }
    }
}
