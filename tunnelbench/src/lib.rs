//! # `TunnelBench`
//!
//! Benchmarks the direct path and one path per WireGuard tunnel definition
//! to a single host, and reports which route has the lowest latency.
//!
//! ## Overview
//!
//! Routes are evaluated strictly one at a time: each tunnel is brought up,
//! given time to settle, probed with ping and traceroute, and torn down again
//! before the next one starts. A tunnel that fails to start, or a probe that
//! fails, shows up as a route with empty metrics rather than aborting the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tunnelbench::Benchmark;
//!
//! # async fn example() -> tunnelbench::Result<()> {
//! let report = Benchmark::builder()
//!     .target("1.1.1.1")
//!     .tunnel_dir("/etc/wireguard")
//!     .build()?
//!     .run()
//!     .await?;
//!
//! match report.best() {
//!     Some(best) => println!("Fastest: {}", best.route),
//!     None => println!("No route reached the target"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `tunnelbench-common` - errors, configuration and defaults
//! - `tunnelbench-core` - probing, tunnel lifecycle and orchestration
//!
//! This crate re-exports the most commonly used items from both.

pub mod benchmark;

// Re-export subcrates
pub use tunnelbench_common as common;
pub use tunnelbench_core as core;

pub use benchmark::{BenchReport, Benchmark, BenchmarkBuilder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::benchmark::{BenchReport, Benchmark};
    pub use crate::common::{BenchConfig, BenchError, Result};
    pub use crate::core::{
        CommandExecutor, CommandOutput, CommandSpec, PlatformAdapter, ProbeResult,
        RouteDefinition,
    };
}

// Convenience re-exports at crate root
pub use common::{BenchConfig, BenchError, Result};
pub use self::core::{
    detect_platform, discover_routes, is_privileged, select_best, CommandExecutor, CommandOutput,
    CommandSpec, PathTrace, PlatformAdapter, PosixAdapter, ProbeResult, RouteDefinition,
    RouteOrchestrator, SystemExecutor, WindowsAdapter,
};
