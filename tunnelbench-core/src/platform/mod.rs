//! Platform-specific command lines and output formats
//!
//! A single [`PlatformAdapter`] is chosen at startup with [`detect_platform`]
//! and injected into the probe runner, endpoint inspector and tunnel
//! controller, so none of them branch on the operating system inline.

use crate::exec::{CommandExecutor, CommandOutput, CommandSpec};
use crate::probe::{parse, PathTrace};
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

mod posix;
mod windows;

pub use posix::PosixAdapter;
pub use windows::WindowsAdapter;

/// Capability interface over the host's probe, tunnel and resolver tools.
pub trait PlatformAdapter: Send + Sync + Debug {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// Latency probe sending `count` echo requests.
    fn ping_command(&self, target: &str, count: u32) -> CommandSpec;

    /// Path trace limited to `max_hops`.
    fn trace_command(&self, target: &str, max_hops: u32) -> CommandSpec;

    /// Bring the tunnel described by `config` up as `name`.
    fn tunnel_up_command(&self, config: &Path, name: &str) -> CommandSpec;

    /// Take tunnel `name` down. Must be harmless when it is already down.
    fn tunnel_down_command(&self, config: &Path, name: &str) -> CommandSpec;

    /// Reverse name lookup for `ip`.
    fn resolve_command(&self, ip: &str) -> CommandSpec;

    /// Command whose outcome tells whether we run elevated.
    fn privilege_command(&self) -> CommandSpec;

    /// Canonical host name from resolver output.
    fn parse_hostname(&self, output: &str) -> Option<String>;

    /// Interpret the outcome of [`privilege_command`](Self::privilege_command).
    fn parse_privileged(&self, output: &CommandOutput) -> bool;

    /// Average round-trip time from latency probe output.
    fn parse_latency(&self, output: &str) -> Option<f64> {
        parse::parse_average_latency(output)
    }

    /// Hop count and last-hop RTT from path trace output.
    fn parse_trace(&self, output: &str) -> PathTrace {
        parse::parse_trace(output)
    }
}

/// Adapter for the operating system this binary was built for.
pub fn detect_platform() -> Arc<dyn PlatformAdapter> {
    if cfg!(windows) {
        Arc::new(WindowsAdapter)
    } else {
        Arc::new(PosixAdapter)
    }
}

/// Whether the process has the privileges tunnel control needs.
///
/// Any failure to run the check counts as "not privileged".
pub async fn is_privileged(
    platform: &dyn PlatformAdapter,
    executor: &dyn CommandExecutor,
) -> bool {
    let command = platform.privilege_command();
    match executor.run(&command, Some(Duration::from_secs(5))).await {
        Ok(output) => platform.parse_privileged(&output),
        Err(e) => {
            debug!("Privilege check `{}` failed: {}", command, e);
            false
        }
    }
}
