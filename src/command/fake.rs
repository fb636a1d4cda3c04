//! Scripted command runner for unit tests

use crate::command::{CommandError, CommandOutput, CommandRunner};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

struct Scripted {
    output: Option<CommandOutput>,
    creates: Vec<(PathBuf, String)>,
}

/// Answers each program with queued responses and records every call
///
/// A program without a queued response fails to spawn.
#[derive(Default)]
pub(crate) struct FakeRunner {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, program: &str, output: CommandOutput) -> Self {
        self.push(program, Some(output), Vec::new())
    }

    /// Queues a response that also writes `files` before returning
    pub(crate) fn respond_creating(
        self,
        program: &str,
        output: CommandOutput,
        files: Vec<(PathBuf, String)>,
    ) -> Self {
        self.push(program, Some(output), files)
    }

    pub(crate) fn fail_to_spawn(self, program: &str) -> Self {
        self.push(program, None, Vec::new())
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn push(
        self,
        program: &str,
        output: Option<CommandOutput>,
        creates: Vec<(PathBuf, String)>,
    ) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(program.to_string())
            .or_default()
            .push_back(Scripted { output, creates });
        self
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .get_mut(program)
            .and_then(VecDeque::pop_front);

        let spawn_error = || CommandError::Spawn {
            program: program.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
        };

        let scripted = scripted.ok_or_else(spawn_error)?;
        for (path, content) in &scripted.creates {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }

        scripted.output.ok_or_else(spawn_error)
    }
}
