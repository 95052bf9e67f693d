//! Configuration types for `TunnelBench` runs

use crate::constants::{
    DEFAULT_DIRECT_ROUTE_NAME, DEFAULT_LATENCY_ATTEMPTS, DEFAULT_PING_COUNT,
    DEFAULT_PING_TIMEOUT_SECS, DEFAULT_RESOLVE_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_STABILIZATION_DELAY_MS, DEFAULT_TRACE_MAX_HOPS, DEFAULT_TRACE_TIMEOUT_SECS,
};
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and probe configuration for a benchmark run.
///
/// Passed into the orchestrator at construction so tests can shrink delays
/// without touching global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Latency probe attempts per route (default: 2)
    pub latency_attempts: u32,
    /// Delay between latency attempts (default: 1s)
    pub retry_delay: Duration,
    /// Echo requests per latency probe (default: 4)
    pub ping_count: u32,
    /// Echo requests for the endpoint pre-flight probe (default: 1)
    pub inspect_ping_count: u32,
    /// Wait after a tunnel comes up before probing (default: 5s)
    pub stabilization_delay: Duration,
    /// Timeout for one latency probe invocation
    pub ping_timeout: Duration,
    /// Timeout for one path-trace invocation
    pub trace_timeout: Duration,
    /// Hop limit for the path trace
    pub trace_max_hops: u32,
    /// Timeout for reverse name resolution
    pub resolve_timeout: Duration,
    /// Timeout for tunnel up/down; `None` leaves it to the OS call
    pub tunnel_timeout: Option<Duration>,
    /// Name given to the non-tunnelled route
    pub direct_route_name: String,
}

impl BenchConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.latency_attempts == 0 {
            return Err(BenchError::Config(
                "latency_attempts must be at least 1".into(),
            ));
        }
        if self.ping_count == 0 || self.inspect_ping_count == 0 {
            return Err(BenchError::Config("ping counts must be at least 1".into()));
        }
        if self.trace_max_hops == 0 {
            return Err(BenchError::Config("trace_max_hops must be at least 1".into()));
        }
        if self.direct_route_name.trim().is_empty() {
            return Err(BenchError::Config("direct_route_name is required".into()));
        }
        Ok(())
    }

    /// Configuration with every delay set to zero, for tests and dry runs.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.retry_delay = Duration::ZERO;
        self.stabilization_delay = Duration::ZERO;
        self
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            latency_attempts: DEFAULT_LATENCY_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            ping_count: DEFAULT_PING_COUNT,
            inspect_ping_count: 1,
            stabilization_delay: Duration::from_millis(DEFAULT_STABILIZATION_DELAY_MS),
            ping_timeout: Duration::from_secs(DEFAULT_PING_TIMEOUT_SECS),
            trace_timeout: Duration::from_secs(DEFAULT_TRACE_TIMEOUT_SECS),
            trace_max_hops: DEFAULT_TRACE_MAX_HOPS,
            resolve_timeout: Duration::from_secs(DEFAULT_RESOLVE_TIMEOUT_SECS),
            tunnel_timeout: None,
            direct_route_name: DEFAULT_DIRECT_ROUTE_NAME.to_string(),
        }
    }
}
