//! Benchmark command implementation

use crate::{prompt, report};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tunnelbench::common::DEFAULT_TUNNEL_DIR;
use tunnelbench::{detect_platform, is_privileged, BenchConfig, Benchmark, SystemExecutor};
use tunnelbench_observability::{init_observability, shutdown_tracing};

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Target hostname or IP. Prompted for when omitted.
    target: Option<String>,

    /// Directory holding WireGuard `*.conf` tunnel definitions
    #[arg(long, default_value = DEFAULT_TUNNEL_DIR, env = "TUNNELBENCH_TUNNEL_DIR")]
    tunnel_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Seconds to wait after a tunnel comes up before probing it
    #[arg(long, default_value = "5", env = "TUNNELBENCH_STABILIZATION_SECS")]
    stabilization_secs: u64,

    /// Latency probe attempts per route
    #[arg(long, default_value = "2", env = "TUNNELBENCH_ATTEMPTS")]
    attempts: u32,

    /// Echo requests per latency probe
    #[arg(long, default_value = "4", env = "TUNNELBENCH_PING_COUNT")]
    ping_count: u32,

    /// Hop limit for the path trace
    #[arg(long, default_value = "30", env = "TUNNELBENCH_MAX_HOPS")]
    max_hops: u32,

    /// Export spans over OTLP (endpoint from OTEL_EXPORTER_OTLP_ENDPOINT)
    #[arg(long, env = "TUNNELBENCH_OBSERVABILITY")]
    observability: bool,
}

impl BenchArgs {
    fn config(&self) -> BenchConfig {
        BenchConfig {
            latency_attempts: self.attempts,
            ping_count: self.ping_count,
            trace_max_hops: self.max_hops,
            stabilization_delay: Duration::from_secs(self.stabilization_secs),
            ..BenchConfig::default()
        }
    }
}

pub async fn run(args: BenchArgs) -> Result<()> {
    init_observability("tunnelbench", &args.log_level, args.observability);
    info!("Starting TunnelBench v{}", env!("CARGO_PKG_VERSION"));

    let outcome = bench(args).await;
    shutdown_tracing();
    outcome
}

async fn bench(args: BenchArgs) -> Result<()> {
    let target = match args.target.clone() {
        Some(target) => target,
        None => prompt::prompt_target(std::io::stdin().lock(), std::io::stdout())?,
    };

    let platform = detect_platform();
    if !is_privileged(platform.as_ref(), &SystemExecutor).await {
        warn!(
            "Not running as {}; tunnels will likely fail to start",
            if cfg!(windows) { "Administrator" } else { "root" }
        );
    }

    let bench = Benchmark::builder()
        .target(&target)
        .tunnel_dir(&args.tunnel_dir)
        .config(args.config())
        .platform(platform)
        .build()
        .context("Invalid benchmark settings")?;

    let report = bench
        .run()
        .await
        .with_context(|| format!("Benchmark of {target} failed"))?;

    print!("{}", report::render(&report));
    Ok(())
}
