//! Scripted command executor for unit tests

#![allow(clippy::unwrap_used)]

use crate::exec::{CommandExecutor, CommandOutput, CommandSpec};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tunnelbench_common::{BenchError, Result};

#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Output(CommandOutput),
    Timeout,
    Panic,
}

/// Replies per program name, consumed in order; the last reply repeats.
/// Programs without a script fail as if not installed.
#[derive(Debug, Default)]
pub(crate) struct ScriptedExecutor {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(self, program: &str, reply: Scripted) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(program.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn on(self, program: &str, output: CommandOutput) -> Self {
        self.push(program, Scripted::Output(output))
    }

    pub(crate) fn on_timeout(self, program: &str) -> Self {
        self.push(program, Scripted::Timeout)
    }

    pub(crate) fn on_panic(self, program: &str) -> Self {
        self.push(program, Scripted::Panic)
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, program: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.program == program)
            .count()
    }

    fn next_reply(&self, program: &str) -> Option<Scripted> {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(program)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn run(&self, command: &CommandSpec, _timeout: Option<Duration>) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());
        match self.next_reply(&command.program) {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::Timeout) => Err(BenchError::Timeout(command.to_string())),
            Some(Scripted::Panic) => panic!("scripted panic in `{command}`"),
            None => Err(BenchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not scripted", command.program),
            ))),
        }
    }
}
