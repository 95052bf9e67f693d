use super::PlatformAdapter;
use crate::exec::{CommandOutput, CommandSpec};
use crate::probe::parse;
use std::path::Path;
use tunnelbench_common::TRACE_PROBE_WAIT_SECS;

/// Windows: `ping`, `tracert`, `wireguard.exe` tunnel services, `nslookup`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsAdapter;

impl PlatformAdapter for WindowsAdapter {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn ping_command(&self, target: &str, count: u32) -> CommandSpec {
        CommandSpec::new("ping")
            .args(["-n".to_string(), count.to_string()])
            .arg(target)
    }

    fn trace_command(&self, target: &str, max_hops: u32) -> CommandSpec {
        CommandSpec::new("tracert")
            .args(["-d", "-w"])
            .arg((TRACE_PROBE_WAIT_SECS * 1000).to_string())
            .arg("-h")
            .arg(max_hops.to_string())
            .arg(target)
    }

    fn tunnel_up_command(&self, config: &Path, _name: &str) -> CommandSpec {
        // The service is registered under the config file stem
        CommandSpec::new("wireguard.exe")
            .arg("/installtunnelservice")
            .arg(config.to_string_lossy())
    }

    fn tunnel_down_command(&self, _config: &Path, name: &str) -> CommandSpec {
        CommandSpec::new("wireguard.exe")
            .arg("/uninstalltunnelservice")
            .arg(name)
    }

    fn resolve_command(&self, ip: &str) -> CommandSpec {
        CommandSpec::new("nslookup").arg(ip)
    }

    fn privilege_command(&self) -> CommandSpec {
        // Only succeeds from an elevated prompt
        CommandSpec::new("net").arg("session")
    }

    fn parse_hostname(&self, output: &str) -> Option<String> {
        parse::parse_name_field(output)
    }

    fn parse_privileged(&self, output: &CommandOutput) -> bool {
        output.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ping_command() {
        let cmd = WindowsAdapter.ping_command("8.8.8.8", 4);
        assert_eq!(cmd.to_string(), "ping -n 4 8.8.8.8");
    }

    #[test]
    fn test_trace_command() {
        let cmd = WindowsAdapter.trace_command("8.8.8.8", 30);
        assert_eq!(cmd.to_string(), "tracert -d -w 1000 -h 30 8.8.8.8");
    }

    #[test]
    fn test_tunnel_down_uses_name() {
        let config = PathBuf::from(r"C:\tunnels\de-fra.conf");
        let down = WindowsAdapter.tunnel_down_command(&config, "de-fra");
        assert_eq!(down.args, vec!["/uninstalltunnelservice", "de-fra"]);
    }

    #[test]
    fn test_parse_hostname_from_nslookup() {
        let output = "Server:  router.lan\r\n\
                      Address:  192.168.1.1\r\n\
                      \r\n\
                      Name:    dns.google\r\n\
                      Address:  8.8.8.8\r\n";
        assert_eq!(
            WindowsAdapter.parse_hostname(output).as_deref(),
            Some("dns.google")
        );
    }

    #[test]
    fn test_parse_hostname_missing() {
        let output = "Server:  router.lan\r\nAddress:  192.168.1.1\r\n\r\n*** router.lan can't find 10.2.3.4: Non-existent domain\r\n";
        assert_eq!(WindowsAdapter.parse_hostname(output), None);
    }
}
