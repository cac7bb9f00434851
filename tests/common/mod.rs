// file: tests/common/mod.rs
// version: 1.0.0
// guid: e4b8a2d0-9c61-4f3e-a7d5-18f06c3b92e7

//! Shared test helpers

use pve_template_kit::network::{CommandOutput, RemoteCommand, RemoteExecutor};
use pve_template_kit::Result;
use std::collections::{HashMap, VecDeque};

/// In-memory host that replays canned outputs and records every command
#[derive(Default)]
pub struct FakeHost {
    responses: HashMap<String, VecDeque<CommandOutput>>,
    pub calls: Vec<String>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; the last queued response repeats
    pub fn on(mut self, command: &str, exit_code: i32, stdout: &str) -> Self {
        self.responses
            .entry(command.to_string())
            .or_default()
            .push_back(CommandOutput::new(exit_code, stdout, ""));
        self
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait::async_trait]
impl RemoteExecutor for FakeHost {
    async fn run(&mut self, command: &RemoteCommand) -> Result<CommandOutput> {
        let rendered = command.render();
        self.calls.push(rendered.clone());

        let output = match self.responses.get_mut(&rendered) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(output.unwrap_or_else(|| CommandOutput::new(127, "", "command not scripted")))
    }
}
