//! TunnelBench CLI
//!
//! Finds the fastest route to a host across the direct path and every
//! configured WireGuard tunnel.

// Use mimalloc as the global allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod commands;
mod prompt;
mod report;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tunnelbench",
    author,
    version,
    about = "Find the lowest-latency route to a host",
    long_about = "TunnelBench measures the direct route and one route per WireGuard tunnel \
                  definition to a single host, one tunnel at a time, and reports the \
                  fastest.\n\n\
                  Raising tunnels needs root (Linux/macOS) or Administrator (Windows)."
)]
struct Cli {
    #[command(flatten)]
    bench: commands::bench::BenchArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::bench::run(cli.bench).await
}
