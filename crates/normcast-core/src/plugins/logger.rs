//! Tracing-backed lifecycle logger

use super::{
    AfterFieldEvent, AfterNormalizeEvent, BeforeFieldEvent, NormalizerPlugin, ValidationErrorEvent,
};

/// Logs every lifecycle point through `tracing`
///
/// Field steps log at `debug`, validation failures at `warn`. Attach a
/// `tracing_subscriber` in the host to see the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggerPlugin;

impl NormalizerPlugin for LoggerPlugin {
    fn before_field_normalize(&self, event: &mut BeforeFieldEvent<'_>) {
        tracing::debug!(field = %event.key, raw = %event.raw_value, "normalizing field");
    }

    fn after_field_normalize(&self, event: &mut AfterFieldEvent<'_>) {
        tracing::debug!(field = %event.key, value = %event.normalized_value, "field normalized");
    }

    fn on_validation_error(&self, event: &ValidationErrorEvent<'_>) {
        tracing::warn!(field = %event.key, error = %event.error, "validation failed");
    }

    fn after_normalize(&self, event: &AfterNormalizeEvent<'_>) {
        tracing::debug!(fields = event.result.len(), errors = event.errors.len(), "normalization finished");
    }
}
