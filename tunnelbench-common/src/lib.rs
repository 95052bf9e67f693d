//! Common utilities and types for `TunnelBench`

pub mod config;
pub mod constants;
pub mod error;

pub use config::BenchConfig;
pub use constants::{
    DEFAULT_DIRECT_ROUTE_NAME, DEFAULT_LATENCY_ATTEMPTS, DEFAULT_PING_COUNT,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_STABILIZATION_DELAY_MS, DEFAULT_TRACE_MAX_HOPS,
    DEFAULT_TUNNEL_DIR, TRACE_PROBE_WAIT_SECS, TUNNEL_CONFIG_EXTENSION,
};
pub use error::{BenchError, Result};
