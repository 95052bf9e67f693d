//! Logging and tracing setup for `TunnelBench`.

pub mod tracing;

pub use tracing::{init_tracing, shutdown_tracing, TracingConfig};

/// Logging only, no OpenTelemetry export.
///
/// `RUST_LOG` wins over `default_level`. Calling this twice is harmless.
pub fn init_minimal_logging(default_level: &str) {
    let _ = init_tracing(TracingConfig {
        default_level: default_level.to_string(),
        otlp_endpoint: None,
        ..TracingConfig::default()
    });
}

/// Logging plus OTLP span export when `enable_export` is set and
/// `OTEL_EXPORTER_OTLP_ENDPOINT` names a collector.
pub fn init_observability(service_name: &str, default_level: &str, enable_export: bool) {
    let otlp_endpoint = if enable_export {
        std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()
    } else {
        None
    };

    let config = TracingConfig {
        service_name: service_name.to_string(),
        default_level: default_level.to_string(),
        otlp_endpoint,
        json: false,
    };

    if let Err(e) = init_tracing(config) {
        // Fall back to plain logging so the run is still observable
        init_minimal_logging(default_level);
        ::tracing::warn!("OpenTelemetry export disabled: {}", e);
    }
}
