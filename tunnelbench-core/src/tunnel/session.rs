use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::OwnedSemaphorePermit;
use tracing::warn;

/// Proof that a tunnel is currently up.
///
/// Holds the controller's single tunnel slot; the slot frees when the
/// session is passed to [`TunnelController::stop`](super::TunnelController::stop)
/// or dropped.
#[derive(Debug)]
pub struct TunnelSession {
    name: String,
    config: PathBuf,
    started_at: Instant,
    released: bool,
    _slot: OwnedSemaphorePermit,
}

impl TunnelSession {
    pub(crate) fn new(name: String, config: PathBuf, slot: OwnedSemaphorePermit) -> Self {
        Self {
            name,
            config,
            started_at: Instant::now(),
            released: false,
            _slot: slot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Path {
        &self.config
    }

    /// Time since the tunnel came up, stabilization delay included.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub(crate) fn mark_released(&mut self) {
        self.released = true;
    }
}

impl Drop for TunnelSession {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                "Tunnel session {} dropped without teardown; the interface may still be up",
                self.name
            );
        }
    }
}
