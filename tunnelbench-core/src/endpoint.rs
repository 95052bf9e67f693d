//! Pre-flight inspection of a tunnel's remote endpoint
//!
//! Purely informational: every failure here degrades to a log line and
//! never affects route scoring.

use crate::exec::CommandExecutor;
use crate::platform::PlatformAdapter;
use crate::probe::ProbeRunner;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};
use tunnelbench_common::{BenchConfig, BenchError, Result};

#[allow(clippy::expect_used)]
static ENDPOINT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^\s*endpoint\s*=\s*(\S+)\s*$").expect("valid endpoint regex")
});

/// Remote address a tunnel connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelEndpoint {
    pub host: String,
    pub port: u16,
}

impl TunnelEndpoint {
    /// Parse `host:port` or `[v6addr]:port`.
    pub fn parse(value: &str) -> Result<Self> {
        let malformed = || BenchError::EndpointParse(format!("malformed endpoint `{value}`"));

        let (host, port) = if let Some(rest) = value.strip_prefix('[') {
            rest.split_once("]:").ok_or_else(malformed)?
        } else {
            value.rsplit_once(':').ok_or_else(malformed)?
        };

        if host.is_empty() {
            return Err(malformed());
        }
        let port = port.parse::<u16>().map_err(|_| malformed())?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// Endpoint declared in a tunnel definition's text.
    pub fn from_config(text: &str) -> Result<Self> {
        let value = ENDPOINT_LINE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| BenchError::EndpointParse("no Endpoint line".into()))?;
        Self::parse(value.as_str())
    }
}

impl fmt::Display for TunnelEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// What the pre-flight check found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointReport {
    pub endpoint: Option<TunnelEndpoint>,
    pub hostname: Option<String>,
    pub latency_ms: Option<f64>,
}

/// Looks at a tunnel's endpoint before the tunnel is raised.
#[derive(Clone)]
pub struct EndpointInspector {
    platform: Arc<dyn PlatformAdapter>,
    executor: Arc<dyn CommandExecutor>,
    probe: ProbeRunner,
    config: Arc<BenchConfig>,
}

impl fmt::Debug for EndpointInspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointInspector")
            .field("platform", &self.platform.name())
            .finish_non_exhaustive()
    }
}

impl EndpointInspector {
    pub fn new(
        platform: Arc<dyn PlatformAdapter>,
        executor: Arc<dyn CommandExecutor>,
        probe: ProbeRunner,
        config: Arc<BenchConfig>,
    ) -> Self {
        Self {
            platform,
            executor,
            probe,
            config,
        }
    }

    /// Parse the endpoint out of `config_path`, reverse-resolve it and ping it once.
    pub async fn inspect(&self, config_path: &Path) -> EndpointReport {
        let mut report = EndpointReport::default();

        let text = match tokio::fs::read_to_string(config_path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not read {}: {}", config_path.display(), e);
                return report;
            }
        };

        let endpoint = match TunnelEndpoint::from_config(&text) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                info!("Could not parse endpoint in {}: {}", config_path.display(), e);
                return report;
            }
        };
        info!("Endpoint: {}", endpoint);

        report.hostname = self.resolve_hostname(&endpoint.host).await;
        match &report.hostname {
            Some(name) => info!("Endpoint host resolves to {}", name),
            None => info!("Endpoint host {} not resolved", endpoint.host),
        }

        match self
            .probe
            .ping(&endpoint.host, self.config.inspect_ping_count)
            .await
        {
            Ok(ms) => {
                info!("Endpoint ping: {:.2} ms", ms);
                report.latency_ms = Some(ms);
            }
            Err(e) => info!("Endpoint ping: no response ({})", e),
        }

        report.endpoint = Some(endpoint);
        report
    }

    /// Reverse name lookup; `None` when unresolved or the resolver failed.
    pub async fn resolve_hostname(&self, ip: &str) -> Option<String> {
        let command = self.platform.resolve_command(ip);
        match self
            .executor
            .run(&command, Some(self.config.resolve_timeout))
            .await
        {
            Ok(output) if output.success => self.platform.parse_hostname(&output.stdout),
            Ok(_) => None,
            Err(e) => {
                warn!("Reverse lookup of {} failed: {}", ip, e);
                None
            }
        }
    }
}
