use super::{parse, PathTrace};
use crate::exec::CommandExecutor;
use crate::platform::PlatformAdapter;
use crate::retry::{Retry, RetryPolicy};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tunnelbench_common::{BenchConfig, BenchError, Result};

/// Runs latency and path-trace probes against a target host.
#[derive(Clone)]
pub struct ProbeRunner {
    platform: Arc<dyn PlatformAdapter>,
    executor: Arc<dyn CommandExecutor>,
    config: Arc<BenchConfig>,
}

impl std::fmt::Debug for ProbeRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeRunner")
            .field("platform", &self.platform.name())
            .finish_non_exhaustive()
    }
}

impl ProbeRunner {
    pub fn new(
        platform: Arc<dyn PlatformAdapter>,
        executor: Arc<dyn CommandExecutor>,
        config: Arc<BenchConfig>,
    ) -> Self {
        Self {
            platform,
            executor,
            config,
        }
    }

    /// Average latency to `target` in milliseconds.
    ///
    /// Retries within the configured budget; `None` when no attempt produced
    /// a parseable answer.
    pub async fn measure_latency(&self, target: &str) -> Option<f64> {
        let mut retry = Retry::new(RetryPolicy::from(self.config.as_ref()));

        while let Some((attempt, pause)) = retry.next_attempt() {
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
            info!("Latency probe to {} (attempt {})", target, attempt);

            match self.ping(target, self.config.ping_count).await {
                Ok(avg) => {
                    info!("Average latency to {}: {:.2} ms", target, avg);
                    return Some(avg);
                }
                Err(e) => warn!("Latency probe attempt {} failed: {}", attempt, e),
            }
        }

        warn!(
            "No latency result for {} after {} attempts",
            target,
            retry.attempts()
        );
        None
    }

    /// Single latency probe with `count` echo requests, no retry.
    pub async fn ping(&self, target: &str, count: u32) -> Result<f64> {
        let command = self.platform.ping_command(target, count);
        let output = self
            .executor
            .run(&command, Some(self.config.ping_timeout))
            .await?;

        if !output.success {
            return Err(BenchError::ProbeFailed(format!(
                "`{}`: {}",
                command,
                output.failure_summary()
            )));
        }

        self.platform
            .parse_latency(&output.stdout)
            .ok_or_else(|| BenchError::ProbeUnparseable(format!("`{command}`")))
    }

    /// Hop count and last-hop RTT towards `target`.
    ///
    /// Runs once. A trace without hop lines is reported as incomplete, never
    /// as an error.
    pub async fn trace_path(&self, target: &str) -> PathTrace {
        let command = self
            .platform
            .trace_command(target, self.config.trace_max_hops);
        info!("Tracing path to {}", target);

        let output = match self
            .executor
            .run(&command, Some(self.config.trace_timeout))
            .await
        {
            Ok(output) => output,
            Err(e) => {
                warn!("Path trace to {} incomplete: {}", target, e);
                return PathTrace::incomplete();
            }
        };

        // traceroute exits non-zero on some unreachable paths but still
        // prints the hops it saw, so parse regardless of status
        for line in parse::hop_lines(&output.stdout) {
            debug!("  {}", line.trim_end());
        }

        let trace = self.platform.parse_trace(&output.stdout);
        if trace.is_complete() {
            info!(
                "Path to {}: {} hops, last hop {}",
                target,
                trace.hop_count,
                trace
                    .last_hop_rtt_ms
                    .map_or_else(|| "no reply".to_string(), |rtt| format!("{rtt:.2} ms"))
            );
        } else {
            warn!("Path trace to {} incomplete: no hops reported", target);
        }
        trace
    }
}
