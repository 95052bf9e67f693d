//! Route evaluation, one route at a time
//!
//! Each tunnel route is evaluated inside [`TunnelController::scoped`], so a
//! tunnel that came up is always torn down before the next route starts.

use crate::endpoint::EndpointInspector;
use crate::exec::CommandExecutor;
use crate::platform::PlatformAdapter;
use crate::probe::ProbeRunner;
use crate::route::{ensure_unique_names, ProbeResult, RouteDefinition};
use crate::tunnel::{run_guarded, TunnelController};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use tunnelbench_common::{BenchConfig, BenchError, Result};

/// Sequences the evaluation of every route against a single target.
#[derive(Debug, Clone)]
pub struct RouteOrchestrator {
    probe: ProbeRunner,
    inspector: EndpointInspector,
    tunnels: TunnelController,
}

impl RouteOrchestrator {
    /// Build the probe runner, inspector and tunnel controller around one
    /// platform adapter and executor.
    pub fn new(
        platform: Arc<dyn PlatformAdapter>,
        executor: Arc<dyn CommandExecutor>,
        config: BenchConfig,
    ) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let probe = ProbeRunner::new(platform.clone(), executor.clone(), config.clone());
        let inspector = EndpointInspector::new(
            platform.clone(),
            executor.clone(),
            probe.clone(),
            config.clone(),
        );
        let tunnels = TunnelController::new(platform, executor, &config);

        Ok(Self {
            probe,
            inspector,
            tunnels,
        })
    }

    pub fn tunnels(&self) -> &TunnelController {
        &self.tunnels
    }

    /// Evaluate `routes` in order against `target`.
    ///
    /// Returns one result per route, in input order. Per-route failures become
    /// null metrics; only invariant violations end the run early.
    pub async fn evaluate(
        &self,
        target: &str,
        routes: &[RouteDefinition],
    ) -> Result<Vec<ProbeResult>> {
        let target = target.trim();
        if target.is_empty() {
            return Err(BenchError::Config("target host is required".into()));
        }
        if routes.is_empty() {
            return Err(BenchError::Config("no routes to evaluate".into()));
        }
        ensure_unique_names(routes)?;

        info!("Benchmarking {} route(s) to {}", routes.len(), target);

        let mut results = Vec::with_capacity(routes.len());
        for (index, route) in routes.iter().enumerate() {
            let span = info_span!("route", name = %route.name(), index);
            let result = self.evaluate_route(target, route).instrument(span).await?;
            results.push(result);
        }
        Ok(results)
    }

    async fn evaluate_route(&self, target: &str, route: &RouteDefinition) -> Result<ProbeResult> {
        let Some(config) = route.tunnel_config() else {
            info!("Testing direct route");
            return Ok(match run_guarded(self.probe_route(target, route.name())).await {
                Ok(result) => result,
                Err(panic) => {
                    error!("Direct route: {}", panic);
                    ProbeResult::unreachable(route.name())
                }
            });
        };

        info!("Testing tunnel route from {}", config.display());
        self.inspector.inspect(config).await;
        self.evaluate_tunnel_route(target, route.name(), config).await
    }

    async fn evaluate_tunnel_route(
        &self,
        target: &str,
        name: &str,
        config: &Path,
    ) -> Result<ProbeResult> {
        match self
            .tunnels
            .scoped(config, name, self.probe_route(target, name))
            .await
        {
            Ok(Ok(result)) => Ok(result),
            // Already logged inside the scope; the tunnel is down again
            Ok(Err(_panic)) => Ok(ProbeResult::unreachable(name)),
            Err(e) if e.is_route_local() => {
                warn!("{}; skipping route", e);
                Ok(ProbeResult::unreachable(name))
            }
            Err(e) => Err(e),
        }
    }

    async fn probe_route(&self, target: &str, name: &str) -> ProbeResult {
        let latency = self.probe.measure_latency(target).await;
        let trace = self.probe.trace_path(target).await;
        ProbeResult::measured(name, latency, trace)
    }
}
