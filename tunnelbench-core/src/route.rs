//! Route definitions and per-route results

use crate::probe::PathTrace;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tunnelbench_common::{BenchError, Result, TUNNEL_CONFIG_EXTENSION};

/// A candidate path to the target: direct, or through one tunnel definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    name: String,
    tunnel_config: Option<PathBuf>,
}

impl RouteDefinition {
    /// The non-tunnelled route.
    pub fn direct(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tunnel_config: None,
        }
    }

    /// A route through the tunnel defined at `config`.
    pub fn tunnel(name: impl Into<String>, config: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            tunnel_config: Some(config.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tunnel_config(&self) -> Option<&Path> {
        self.tunnel_config.as_deref()
    }

    pub fn is_direct(&self) -> bool {
        self.tunnel_config.is_none()
    }
}

/// Outcome of testing one route. `None` metrics mean unreachable or unparseable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub route: String,
    pub avg_latency_ms: Option<f64>,
    pub hop_count: Option<u32>,
    pub last_hop_rtt_ms: Option<f64>,
}

impl ProbeResult {
    /// Result from a completed probe step.
    pub fn measured(route: impl Into<String>, avg_latency_ms: Option<f64>, trace: PathTrace) -> Self {
        Self {
            route: route.into(),
            avg_latency_ms,
            hop_count: Some(trace.hop_count),
            last_hop_rtt_ms: trace.last_hop_rtt_ms,
        }
    }

    /// Result with every metric null, for routes that could not be probed.
    pub fn unreachable(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            avg_latency_ms: None,
            hop_count: None,
            last_hop_rtt_ms: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.avg_latency_ms.is_some()
    }
}

/// The direct route followed by one route per tunnel definition in `dir`.
///
/// Tunnel routes are named after the file stem and sorted by file name.
/// A missing directory yields just the direct route.
pub async fn discover_routes(dir: &Path, direct_name: &str) -> Result<Vec<RouteDefinition>> {
    let mut routes = vec![RouteDefinition::direct(direct_name)];

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Tunnel directory {} not found, testing direct route only",
                dir.display()
            );
            return Ok(routes);
        }
        Err(e) => return Err(e.into()),
    };

    let mut configs = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_config = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TUNNEL_CONFIG_EXTENSION));
        if is_config && entry.file_type().await?.is_file() {
            configs.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }
    configs.sort();

    let mut seen = HashSet::new();
    for path in configs {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if stem == direct_name {
            warn!(
                "Skipping {}: name clashes with the direct route",
                path.display()
            );
            continue;
        }
        if !seen.insert(stem.clone()) {
            warn!(
                "Skipping {}: another definition is already named {}",
                path.display(),
                stem
            );
            continue;
        }
        routes.push(RouteDefinition::tunnel(stem, path));
    }

    Ok(routes)
}

/// Reject route lists in which two routes share a name.
pub fn ensure_unique_names(routes: &[RouteDefinition]) -> Result<()> {
    let mut seen = HashSet::with_capacity(routes.len());
    for route in routes {
        if !seen.insert(route.name()) {
            return Err(BenchError::Config(format!(
                "duplicate route name `{}`",
                route.name()
            )));
        }
    }
    Ok(())
}
