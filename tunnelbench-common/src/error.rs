//! Error types for `TunnelBench`

use thiserror::Error;

/// Main error type for `TunnelBench` operations
#[derive(Error, Debug)]
pub enum BenchError {
    /// IO error (spawning a command, reading a tunnel definition)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External command exceeded its timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External probe exited with an error status
    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    /// Probe output matched none of the known formats
    #[error("Unparseable probe output: {0}")]
    ProbeUnparseable(String),

    /// Tunnel activation command failed
    #[error("Tunnel start failed: {0}")]
    TunnelStart(String),

    /// Tunnel deactivation command failed
    #[error("Tunnel stop failed: {0}")]
    TunnelStop(String),

    /// Tunnel definition has no usable endpoint line
    #[error("Endpoint parse failed: {0}")]
    EndpointParse(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Whether this error only degrades a single route's metrics.
    ///
    /// Everything else is an invariant violation that ends the run.
    pub fn is_route_local(&self) -> bool {
        matches!(
            self,
            BenchError::Io(_)
                | BenchError::Timeout(_)
                | BenchError::ProbeFailed(_)
                | BenchError::ProbeUnparseable(_)
                | BenchError::TunnelStart(_)
                | BenchError::TunnelStop(_)
                | BenchError::EndpointParse(_)
        )
    }
}
