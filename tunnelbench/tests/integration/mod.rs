#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for `TunnelBench`
//!
//! These tests drive full benchmark runs against a simulated network, so no
//! real tunnels are raised and no packets leave the machine.

mod benchmark_test;
mod discovery_test;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tunnelbench::core::{CommandExecutor, CommandOutput, CommandSpec, PosixAdapter};
use tunnelbench::{BenchConfig, BenchError, Benchmark, BenchmarkBuilder, Result};

/// How one route behaves in the simulated network.
#[derive(Debug, Clone, Copy)]
pub enum Link {
    /// Answers pings with this average RTT and traces in `hops` hops.
    Up { avg_ms: f64, hops: u32 },
    /// Pings get no reply; the trace never reaches the target.
    Dark,
    /// The tunnel refuses to come up.
    Refused,
}

#[derive(Debug, Default)]
struct NetworkState {
    active: Option<String>,
    events: Vec<String>,
    overlaps: usize,
}

/// Command executor that simulates ping, traceroute and `wg-quick`.
///
/// Probe replies depend on which tunnel is currently up; the direct route is
/// whatever answers when no tunnel is active.
#[derive(Debug)]
pub struct FakeNetwork {
    direct: Link,
    tunnels: HashMap<String, Link>,
    state: Mutex<NetworkState>,
}

impl FakeNetwork {
    pub fn new(direct: Link) -> Self {
        Self {
            direct,
            tunnels: HashMap::new(),
            state: Mutex::new(NetworkState::default()),
        }
    }

    #[must_use]
    pub fn tunnel(mut self, name: &str, link: Link) -> Self {
        self.tunnels.insert(name.to_string(), link);
        self
    }

    /// `up:<name>`, `down:<name>`, `ping:<name>` and `trace:<name>` in call order.
    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }

    /// Times a tunnel was raised while another was still up.
    pub fn overlaps(&self) -> usize {
        self.state.lock().unwrap().overlaps
    }

    pub fn active(&self) -> Option<String> {
        self.state.lock().unwrap().active.clone()
    }

    fn current_link(&self, state: &NetworkState) -> Link {
        match &state.active {
            Some(name) => self.tunnels.get(name).copied().unwrap_or(Link::Dark),
            None => self.direct,
        }
    }

    fn route_label(state: &NetworkState) -> String {
        state.active.clone().unwrap_or_else(|| "direct".into())
    }

    fn tunnel_name(command: &CommandSpec) -> String {
        Path::new(&command.args[1])
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn ping(&self, command: &CommandSpec) -> CommandOutput {
        let mut state = self.state.lock().unwrap();
        let label = Self::route_label(&state);
        state.events.push(format!("ping:{label}"));

        match self.current_link(&state) {
            Link::Up { avg_ms, .. } => CommandOutput::ok(format!(
                "PING {target}: 56 data bytes\n\
                 --- {target} ping statistics ---\n\
                 4 packets transmitted, 4 received, 0% packet loss\n\
                 rtt min/avg/max/mdev = {min:.3}/{avg_ms:.3}/{max:.3}/0.500 ms\n",
                target = command.args.last().unwrap(),
                min = avg_ms - 1.0,
                max = avg_ms + 1.0,
            )),
            _ => CommandOutput {
                success: false,
                exit_code: Some(1),
                stdout: "4 packets transmitted, 0 received, 100% packet loss\n".into(),
                stderr: String::new(),
            },
        }
    }

    fn trace(&self, command: &CommandSpec) -> CommandOutput {
        let mut state = self.state.lock().unwrap();
        let label = Self::route_label(&state);
        state.events.push(format!("trace:{label}"));

        let target = command.args.last().unwrap();
        let mut out = format!("traceroute to {target}, 30 hops max, 60 byte packets\n");
        if let Link::Up { avg_ms, hops } = self.current_link(&state) {
            for hop in 1..=hops {
                let rtt = avg_ms * f64::from(hop) / f64::from(hops);
                out.push_str(&format!(
                    "{hop:>2}  10.0.{hop}.1  {rtt:.3} ms  {rtt:.3} ms  {rtt:.3} ms\n"
                ));
            }
        }
        CommandOutput::ok(out)
    }

    fn wg_quick(&self, command: &CommandSpec) -> CommandOutput {
        let name = Self::tunnel_name(command);
        let mut state = self.state.lock().unwrap();

        match command.args[0].as_str() {
            "up" => {
                state.events.push(format!("up:{name}"));
                if matches!(self.tunnels.get(&name), Some(Link::Refused)) {
                    return CommandOutput::failed(1, format!("wg-quick: `{name}' failed to start"));
                }
                if state.active.is_some() {
                    state.overlaps += 1;
                }
                state.active = Some(name);
                CommandOutput::ok("")
            }
            _ => {
                state.events.push(format!("down:{name}"));
                if state.active.as_deref() == Some(name.as_str()) {
                    state.active = None;
                }
                CommandOutput::ok("")
            }
        }
    }
}

#[async_trait]
impl CommandExecutor for FakeNetwork {
    async fn run(&self, command: &CommandSpec, _timeout: Option<Duration>) -> Result<CommandOutput> {
        match command.program.as_str() {
            "ping" => Ok(self.ping(command)),
            "traceroute" => Ok(self.trace(command)),
            "wg-quick" => Ok(self.wg_quick(command)),
            // Reverse lookups are informational; answer "not found"
            "host" => Ok(CommandOutput::failed(1, "Host not found: 3(NXDOMAIN)")),
            other => Err(BenchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{other} not simulated"),
            ))),
        }
    }
}

/// Write `<name>.conf` tunnel definitions into `dir`.
pub fn write_tunnel_configs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let path = dir.join(format!("{name}.conf"));
            std::fs::write(
                &path,
                format!(
                    "[Interface]\nPrivateKey = aGVsbG8=\nAddress = 10.64.{i}.2/32\n\n\
                     [Peer]\nPublicKey = d29ybGQ=\nAllowedIPs = 0.0.0.0/0\n\
                     Endpoint = 198.51.100.{i}:51820\n"
                ),
            )
            .unwrap();
            path
        })
        .collect()
}

/// Benchmark builder wired to `network` with all delays removed.
pub fn bench_with(network: &Arc<FakeNetwork>) -> BenchmarkBuilder {
    Benchmark::builder()
        .platform(Arc::new(PosixAdapter))
        .executor(network.clone())
        .config(BenchConfig::default().without_delays())
}
