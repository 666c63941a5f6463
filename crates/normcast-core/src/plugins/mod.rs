//! Plugin hooks and the plugin registry
//!
//! Plugins observe the normalization lifecycle at four points. Every hook
//! has a no-op default, so implementations pick only the points they care
//! about. Hooks do not influence control flow; the one sanctioned side
//! channel is [`BeforeFieldEvent::options`], through which an observer may
//! mutate the transformer map for the pass in flight.
//!
//! The registry is an explicit value handed to engine construction, not
//! process-global state: build one at startup, register the defaults, and
//! thread it into every engine via
//! [`InputNormalizer::with_registry`](crate::engine::InputNormalizer::with_registry).
//! Registry plugins always run ahead of per-engine plugins.

pub mod audit;
pub mod logger;
pub mod sanitizer;

pub use audit::{AuditEntry, AuditTrailPlugin};
pub use logger::LoggerPlugin;
pub use sanitizer::SanitizerPlugin;

use crate::options::NormalizerOptions;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Payload for the before-field hook
///
/// `options` is the working configuration of the current pass; mutating
/// `options.field_transformers` here affects the field being processed.
pub struct BeforeFieldEvent<'a> {
    pub key: &'a str,
    pub raw_value: &'a Value,
    pub options: &'a mut NormalizerOptions,
}

/// Payload for the after-field hook
///
/// `result` is the in-progress result map, with this field already
/// committed; plugins may rewrite entries in place.
pub struct AfterFieldEvent<'a> {
    pub key: &'a str,
    pub normalized_value: &'a Value,
    pub raw_value: &'a Value,
    pub result: &'a mut Map<String, Value>,
}

/// Payload for the on-validation-error hook
pub struct ValidationErrorEvent<'a> {
    pub key: &'a str,
    pub error: &'a str,
    pub current_value: &'a Value,
}

/// Payload for the after-normalize hook
pub struct AfterNormalizeEvent<'a> {
    pub result: &'a Map<String, Value>,
    pub errors: &'a BTreeMap<String, String>,
}

/// Observer over the normalization lifecycle
pub trait NormalizerPlugin: Send + Sync {
    fn before_field_normalize(&self, _event: &mut BeforeFieldEvent<'_>) {}

    fn after_field_normalize(&self, _event: &mut AfterFieldEvent<'_>) {}

    fn on_validation_error(&self, _event: &ValidationErrorEvent<'_>) {}

    fn after_normalize(&self, _event: &AfterNormalizeEvent<'_>) {}
}

/// Append-only list of plugins shared across engines
///
/// No internal locking: the registry is a plain value. Share it behind
/// your own synchronization if registration happens concurrently.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn NormalizerPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin; registration order is dispatch order
    pub fn register(&mut self, plugin: Arc<dyn NormalizerPlugin>) {
        self.plugins.push(plugin);
    }

    /// Drop every registered plugin
    pub fn clear(&mut self) {
        self.plugins.clear();
    }

    /// Defensive copy of the registered plugin handles
    pub fn get_all(&self) -> Vec<Arc<dyn NormalizerPlugin>> {
        self.plugins.clone()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;
    impl NormalizerPlugin for Noop {}

    #[test]
    fn test_registry_lifecycle() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(Noop));
        registry.register(Arc::new(Noop));
        assert_eq!(registry.len(), 2);

        let snapshot = registry.get_all();
        registry.clear();
        assert!(registry.is_empty());
        // The snapshot is a copy, unaffected by the clear.
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let plugin = Noop;
        let event = ValidationErrorEvent {
            key: "k",
            error: "e",
            current_value: &serde_json::Value::Null,
        };
        plugin.on_validation_error(&event);
    }
}
