use super::PlatformAdapter;
use crate::exec::{CommandOutput, CommandSpec};
use crate::probe::parse;
use std::path::Path;
use tunnelbench_common::TRACE_PROBE_WAIT_SECS;

/// Linux / macOS: `ping`, `traceroute`, `wg-quick`, `host`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixAdapter;

impl PlatformAdapter for PosixAdapter {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn ping_command(&self, target: &str, count: u32) -> CommandSpec {
        CommandSpec::new("ping")
            .args(["-c".to_string(), count.to_string()])
            .arg(target)
    }

    fn trace_command(&self, target: &str, max_hops: u32) -> CommandSpec {
        // -n skips per-hop reverse lookups, which dominate runtime otherwise
        CommandSpec::new("traceroute")
            .args(["-n", "-w"])
            .arg(TRACE_PROBE_WAIT_SECS.to_string())
            .arg("-m")
            .arg(max_hops.to_string())
            .arg(target)
    }

    fn tunnel_up_command(&self, config: &Path, _name: &str) -> CommandSpec {
        // wg-quick names the interface after the file stem
        CommandSpec::new("wg-quick")
            .arg("up")
            .arg(config.to_string_lossy())
    }

    fn tunnel_down_command(&self, config: &Path, _name: &str) -> CommandSpec {
        CommandSpec::new("wg-quick")
            .arg("down")
            .arg(config.to_string_lossy())
    }

    fn resolve_command(&self, ip: &str) -> CommandSpec {
        CommandSpec::new("host").arg(ip)
    }

    fn privilege_command(&self) -> CommandSpec {
        CommandSpec::new("id").arg("-u")
    }

    fn parse_hostname(&self, output: &str) -> Option<String> {
        parse::parse_pointer_record(output).or_else(|| parse::parse_name_field(output))
    }

    fn parse_privileged(&self, output: &CommandOutput) -> bool {
        output.success && output.stdout.trim() == "0"
    }
}
