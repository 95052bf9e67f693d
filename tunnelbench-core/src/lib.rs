//! Core of `TunnelBench`: probing, tunnel lifecycle and route orchestration.
//!
//! External programs (ping, traceroute, wg-quick, ...) are reached through
//! [`CommandExecutor`], and their command lines and output formats through a
//! [`PlatformAdapter`] chosen once at startup.

pub mod endpoint;
pub mod exec;
pub mod orchestrator;
pub mod platform;
pub mod probe;
pub mod retry;
pub mod route;
pub mod selector;
pub mod tunnel;

#[cfg(test)]
pub(crate) mod testing;

// Re-export specific items for convenience
pub use endpoint::{EndpointInspector, EndpointReport, TunnelEndpoint};
pub use exec::{CommandExecutor, CommandOutput, CommandSpec, SystemExecutor};
pub use orchestrator::RouteOrchestrator;
pub use platform::{detect_platform, is_privileged, PlatformAdapter, PosixAdapter, WindowsAdapter};
pub use probe::{PathTrace, ProbeRunner};
pub use route::{discover_routes, ensure_unique_names, ProbeResult, RouteDefinition};
pub use selector::{select_best, select_best_index};
pub use tunnel::{run_guarded, BodyPanic, TunnelController, TunnelSession};
