//! External command execution
//!
//! Every probe, tunnel and resolution step ends up here. The
//! [`CommandExecutor`] trait is the seam embedders and tests use to script
//! command output instead of touching the real network.

use async_trait::async_trait;
use std::fmt;
use std::process::Stdio;
use std::time::Duration;
use tunnelbench_common::{BenchError, Result};

/// Program plus arguments, built by a [`PlatformAdapter`](crate::PlatformAdapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status was zero
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Short description of a failure for log lines and error messages.
    pub fn failure_summary(&self) -> String {
        let code = self
            .exit_code
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        let detail = self.stderr.trim();
        if detail.is_empty() {
            format!("exit status {code}")
        } else {
            format!("exit status {code}: {detail}")
        }
    }
}

/// Runs external commands on behalf of the core.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` to completion.
    ///
    /// A command that outlives `timeout` yields [`BenchError::Timeout`];
    /// `None` waits for as long as the command runs.
    async fn run(&self, command: &CommandSpec, timeout: Option<Duration>) -> Result<CommandOutput>;
}

/// [`CommandExecutor`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

#[async_trait]
impl CommandExecutor for SystemExecutor {
    async fn run(&self, command: &CommandSpec, timeout: Option<Duration>) -> Result<CommandOutput> {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // CREATE_NO_WINDOW: keep console windows from flashing up
        #[cfg(windows)]
        cmd.creation_flags(0x0800_0000);

        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| BenchError::Timeout(format!("`{command}` after {limit:?}")))??,
            None => cmd.output().await?,
        };

        Ok(CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
