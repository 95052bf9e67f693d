//! Default timings and names for TunnelBench runs.
//!
//! Use these constants instead of magic numbers so defaults stay consistent
//! across the core library, CLI, and tests.

/// Number of latency probe attempts before a route is declared unreachable.
pub const DEFAULT_LATENCY_ATTEMPTS: u32 = 2;

/// Delay between latency probe attempts, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Echo requests sent per latency probe.
pub const DEFAULT_PING_COUNT: u32 = 4;

/// Wait after tunnel activation before the first probe, in milliseconds.
///
/// Covers route and DNS convergence on the freshly raised interface.
pub const DEFAULT_STABILIZATION_DELAY_MS: u64 = 5000;

/// Timeout for one latency probe invocation, in seconds.
pub const DEFAULT_PING_TIMEOUT_SECS: u64 = 30;

/// Timeout for one path-trace invocation, in seconds.
///
/// Must exceed the trace tool's own worst case, or the hops it already
/// printed are lost when the process is killed.
pub const DEFAULT_TRACE_TIMEOUT_SECS: u64 = 120;

/// Per-probe reply wait handed to the path-trace tool, in seconds.
pub const TRACE_PROBE_WAIT_SECS: u64 = 1;

/// Probes the path-trace tools send per hop (both default to three).
pub const TRACE_PROBES_PER_HOP: u32 = 3;

/// Timeout for reverse name resolution, in seconds.
pub const DEFAULT_RESOLVE_TIMEOUT_SECS: u64 = 5;

/// Hop limit handed to the path-trace tool.
pub const DEFAULT_TRACE_MAX_HOPS: u32 = 30;

/// Name of the non-tunnelled route.
pub const DEFAULT_DIRECT_ROUTE_NAME: &str = "Direct";

/// Directory scanned for tunnel definitions when none is given.
pub const DEFAULT_TUNNEL_DIR: &str = "tunnels";

/// File extension of tunnel definitions (without the dot).
pub const TUNNEL_CONFIG_EXTENSION: &str = "conf";
