//! Latency and path-trace probing
//!
//! [`ProbeRunner`] drives the external tools; [`parse`] turns their text into
//! numbers.

pub mod parse;
pub mod runner;

pub use runner::ProbeRunner;

/// Outcome of a path trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTrace {
    /// Number of hop lines seen
    pub hop_count: u32,
    /// RTT of the final hop, if it answered
    pub last_hop_rtt_ms: Option<f64>,
}

impl PathTrace {
    /// Trace that produced no hop lines (timeout, unreachable or tool error).
    pub const fn incomplete() -> Self {
        Self {
            hop_count: 0,
            last_hop_rtt_ms: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.hop_count > 0
    }
}

impl Default for PathTrace {
    fn default() -> Self {
        Self::incomplete()
    }
}
