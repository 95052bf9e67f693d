use super::guard::{run_guarded, BodyPanic};
use super::session::TunnelSession;
use crate::exec::CommandExecutor;
use crate::platform::PlatformAdapter;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};
use tunnelbench_common::{BenchConfig, BenchError, Result};

/// Starts and stops tunnels, one at a time.
#[derive(Clone)]
pub struct TunnelController {
    platform: Arc<dyn PlatformAdapter>,
    executor: Arc<dyn CommandExecutor>,
    stabilization_delay: Duration,
    command_timeout: Option<Duration>,
    slot: Arc<Semaphore>,
}

impl std::fmt::Debug for TunnelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TunnelController")
            .field("platform", &self.platform.name())
            .field("stabilization_delay", &self.stabilization_delay)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl TunnelController {
    pub fn new(
        platform: Arc<dyn PlatformAdapter>,
        executor: Arc<dyn CommandExecutor>,
        config: &BenchConfig,
    ) -> Self {
        Self {
            platform,
            executor,
            stabilization_delay: config.stabilization_delay,
            command_timeout: config.tunnel_timeout,
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Whether a session is currently held.
    pub fn is_active(&self) -> bool {
        self.slot.available_permits() == 0
    }

    /// Bring up the tunnel defined at `config` as `name`.
    ///
    /// Waits out the stabilization delay before returning the session.
    ///
    /// # Errors
    ///
    /// [`BenchError::TunnelStart`] when activation fails (no session exists
    /// and nothing needs tearing down); [`BenchError::InvalidState`] when
    /// another session is still active.
    pub async fn start(&self, config: &Path, name: &str) -> Result<TunnelSession> {
        let slot = self.slot.clone().try_acquire_owned().map_err(|_| {
            BenchError::InvalidState(format!(
                "cannot start tunnel {name}: another tunnel is still active"
            ))
        })?;

        let command = self.platform.tunnel_up_command(config, name);
        info!("Starting tunnel {}", name);

        let output = self
            .executor
            .run(&command, self.command_timeout)
            .await
            .map_err(|e| BenchError::TunnelStart(format!("{name}: {e}")))?;
        if !output.success {
            return Err(BenchError::TunnelStart(format!(
                "{name}: {}",
                output.failure_summary()
            )));
        }

        let session = TunnelSession::new(name.to_string(), config.to_path_buf(), slot);
        if !self.stabilization_delay.is_zero() {
            info!(
                "Tunnel {} up, waiting {:?} for routes to settle",
                name, self.stabilization_delay
            );
            tokio::time::sleep(self.stabilization_delay).await;
        }
        Ok(session)
    }

    /// Tear the session's tunnel down.
    ///
    /// Failures are logged and swallowed; the slot is freed either way.
    pub async fn stop(&self, mut session: TunnelSession) {
        let command = self
            .platform
            .tunnel_down_command(session.config(), session.name());
        info!("Stopping tunnel {}", session.name());

        let outcome = match self.executor.run(&command, self.command_timeout).await {
            Ok(output) if output.success => Ok(()),
            Ok(output) => Err(BenchError::TunnelStop(format!(
                "{}: {}",
                session.name(),
                output.failure_summary()
            ))),
            Err(e) => Err(BenchError::TunnelStop(format!("{}: {e}", session.name()))),
        };

        if let Err(e) = outcome {
            warn!("{}; the interface may still be up", e);
        }
        session.mark_released();
    }

    /// Run `body` with the tunnel up, stopping it afterwards on every path.
    ///
    /// The outer `Result` reports whether the tunnel started; the inner one
    /// whether `body` completed or panicked. `body` is not polled when the
    /// start fails.
    pub async fn scoped<F, T>(
        &self,
        config: &Path,
        name: &str,
        body: F,
    ) -> Result<std::result::Result<T, BodyPanic>>
    where
        F: Future<Output = T>,
    {
        let session = self.start(config, name).await?;
        let outcome = run_guarded(body).await;
        if let Err(panic) = &outcome {
            error!("Tunnel {}: {}", name, panic);
        }
        self.stop(session).await;
        Ok(outcome)
    }
}
