//! Example: Embedded `TunnelBench` run
//!
//! This example shows how to run a benchmark from your own application and
//! act on the result.
//!
//! # Usage
//!
//! ```bash
//! # Tunnels are raised and torn down, so this needs root / Administrator
//! sudo cargo run --example embedded_bench -- \
//!     --target 1.1.1.1 \
//!     --tunnel-dir /etc/wireguard
//! ```

use std::env;
use std::time::Duration;
use tunnelbench::Benchmark;

#[tokio::main]
async fn main() -> tunnelbench::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,tunnelbench=debug")
        .init();

    // Parse command line arguments (simple parsing for example)
    let args: Vec<String> = env::args().collect();

    let target = get_arg(&args, "--target").unwrap_or_else(|| "1.1.1.1".to_string());
    let tunnel_dir = get_arg(&args, "--tunnel-dir").unwrap_or_else(|| "tunnels".to_string());

    println!("`TunnelBench` Embedded Example");
    println!("==============================");
    println!("Target:     {target}");
    println!("Tunnel dir: {tunnel_dir}");
    println!();

    let bench = Benchmark::builder()
        .target(&target)
        .tunnel_dir(&tunnel_dir)
        .stabilization_delay(Duration::from_secs(3))
        .build()?;

    let routes = bench.routes().await?;
    println!("Evaluating {} route(s)...", routes.len());

    let report = bench.run().await?;

    for (i, result) in report.results.iter().enumerate() {
        let latency = result
            .avg_latency_ms
            .map_or_else(|| "unreachable".to_string(), |ms| format!("{ms:.2} ms"));
        let marker = if report.is_best(i) { "  (fastest)" } else { "" };
        println!("  {:<20} {latency}{marker}", result.route);
    }

    match report.best() {
        Some(best) => println!("\nUse route: {}", best.route),
        None => println!("\nNo route reached {target}"),
    }

    Ok(())
}

fn get_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
