//! Embeddable benchmark runner with builder pattern.
//!
//! # Example
//!
//! ```rust,no_run
//! use tunnelbench::{Benchmark, RouteDefinition};
//!
//! # async fn example() -> tunnelbench::Result<()> {
//! let report = Benchmark::builder()
//!     .target("example.com")
//!     .routes(vec![
//!         RouteDefinition::direct("Direct"),
//!         RouteDefinition::tunnel("de-fra", "/etc/wireguard/de-fra.conf"),
//!     ])
//!     .build()?
//!     .run()
//!     .await?;
//!
//! for result in &report.results {
//!     println!("{}: {:?}", result.route, result.avg_latency_ms);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tunnelbench_common::{BenchConfig, BenchError, Result, DEFAULT_TUNNEL_DIR};
use tunnelbench_core::{
    detect_platform, discover_routes, ensure_unique_names, select_best_index, CommandExecutor, PlatformAdapter,
    ProbeResult, RouteDefinition, RouteOrchestrator, SystemExecutor,
};

/// A configured benchmark against one target host.
///
/// Use [`Benchmark::builder()`] to create one.
#[derive(Debug)]
pub struct Benchmark {
    target: String,
    routes: Option<Vec<RouteDefinition>>,
    tunnel_dir: PathBuf,
    direct_route_name: String,
    orchestrator: RouteOrchestrator,
}

/// Builder for constructing a [`Benchmark`].
#[derive(Default)]
pub struct BenchmarkBuilder {
    target: Option<String>,
    routes: Option<Vec<RouteDefinition>>,
    tunnel_dir: Option<PathBuf>,
    config: BenchConfig,
    platform: Option<Arc<dyn PlatformAdapter>>,
    executor: Option<Arc<dyn CommandExecutor>>,
}

impl fmt::Debug for BenchmarkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkBuilder")
            .field("target", &self.target)
            .field("routes", &self.routes)
            .field("tunnel_dir", &self.tunnel_dir)
            .field("config", &self.config)
            .field("platform", &self.platform.as_ref().map(|p| p.name()))
            .finish_non_exhaustive()
    }
}

/// Outcome of a benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub target: String,
    /// One entry per route, in evaluation order.
    pub results: Vec<ProbeResult>,
    /// Index into `results` of the fastest reachable route.
    pub best: Option<usize>,
}

impl BenchReport {
    pub fn new(target: impl Into<String>, results: Vec<ProbeResult>) -> Self {
        let best = select_best_index(&results);
        Self {
            target: target.into(),
            results,
            best,
        }
    }

    /// The fastest reachable route, if any route answered.
    pub fn best(&self) -> Option<&ProbeResult> {
        self.best.and_then(|i| self.results.get(i))
    }

    pub fn is_best(&self, index: usize) -> bool {
        self.best == Some(index)
    }

    pub fn reachable_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_reachable()).count()
    }
}

impl Benchmark {
    /// Create a new benchmark builder.
    pub fn builder() -> BenchmarkBuilder {
        BenchmarkBuilder::default()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Directory scanned for tunnel definitions when no explicit routes were given.
    pub fn tunnel_dir(&self) -> &Path {
        &self.tunnel_dir
    }

    /// The routes this benchmark will evaluate.
    ///
    /// Explicit routes are returned as given; otherwise the tunnel directory
    /// is scanned, with the direct route first.
    pub async fn routes(&self) -> Result<Vec<RouteDefinition>> {
        match &self.routes {
            Some(routes) => Ok(routes.clone()),
            None => discover_routes(&self.tunnel_dir, &self.direct_route_name).await,
        }
    }

    /// Evaluate every route in turn and pick the fastest.
    ///
    /// # Errors
    ///
    /// Fails only when there is nothing to evaluate or a tunnel is still held
    /// from an earlier run. Per-route failures show up as unreachable results.
    pub async fn run(&self) -> Result<BenchReport> {
        let routes = self.routes().await?;
        let results = self.orchestrator.evaluate(&self.target, &routes).await?;
        let report = BenchReport::new(self.target.clone(), results);

        match report.best() {
            Some(best) => info!(
                "Best route to {}: {} ({:.2} ms)",
                report.target,
                best.route,
                best.avg_latency_ms.unwrap_or_default()
            ),
            None => info!("No route reached {}", report.target),
        }
        Ok(report)
    }
}

impl BenchmarkBuilder {
    /// Set the host to benchmark: a hostname or IP address.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Evaluate exactly these routes instead of scanning a directory.
    #[must_use]
    pub fn routes(mut self, routes: Vec<RouteDefinition>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Directory holding `*.conf` tunnel definitions.
    ///
    /// Default: `"tunnels"`. Ignored when [`routes`](Self::routes) is set.
    #[must_use]
    pub fn tunnel_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tunnel_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: BenchConfig) -> Self {
        self.config = config;
        self
    }

    /// Wait after a tunnel comes up before probing it.
    ///
    /// Default: 5 seconds
    #[must_use]
    pub fn stabilization_delay(mut self, delay: Duration) -> Self {
        self.config.stabilization_delay = delay;
        self
    }

    /// Override the platform adapter detected from the host OS.
    #[must_use]
    pub fn platform(mut self, platform: Arc<dyn PlatformAdapter>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Override how external commands are run.
    ///
    /// Default: [`SystemExecutor`]
    #[must_use]
    pub fn executor(mut self, executor: Arc<dyn CommandExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Build the benchmark with the configured options.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is missing or blank, if explicit
    /// routes share a name, or if the configuration fails validation.
    pub fn build(self) -> Result<Benchmark> {
        let target = self
            .target
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BenchError::Config("target host is required".into()))?;

        if let Some(routes) = &self.routes {
            ensure_unique_names(routes)?;
        }

        let direct_route_name = self.config.direct_route_name.clone();
        let platform = self.platform.unwrap_or_else(detect_platform);
        let executor: Arc<dyn CommandExecutor> = match self.executor {
            Some(executor) => executor,
            None => Arc::new(SystemExecutor),
        };
        let orchestrator = RouteOrchestrator::new(platform, executor, self.config)?;

        Ok(Benchmark {
            target,
            routes: self.routes,
            tunnel_dir: self
                .tunnel_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TUNNEL_DIR)),
            direct_route_name,
            orchestrator,
        })
    }
}
