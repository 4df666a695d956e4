//! In-memory [`CommandRunner`] for exercising code that drives the tool.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;

use crate::{AutomationError, CommandRunner};

/// Records every argument list and answers from a script keyed by subcommand
/// (the first argument) or by the full space-joined command line. Unscripted
/// calls succeed with empty stdout.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    stdout: Mutex<HashMap<String, String>>,
    failures: Mutex<HashMap<String, String>>,
    line_failures: Mutex<HashMap<String, String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, subcommand: &str, stdout: &str) {
        lock(&self.stdout).insert(subcommand.to_string(), stdout.to_string());
    }

    /// Makes `subcommand` exit with status 1 and `stderr`.
    pub fn fail(&self, subcommand: &str, stderr: &str) {
        lock(&self.failures).insert(subcommand.to_string(), stderr.to_string());
    }

    /// Makes only the exact command line `line` (e.g. `mousemove 10 10`) fail.
    pub fn fail_line(&self, line: &str, stderr: &str) {
        lock(&self.line_failures).insert(line.to_string(), stderr.to_string());
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        lock(&self.calls).clone()
    }

    /// Calls joined with spaces, for compact assertions.
    pub fn command_lines(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|args| args.join(" ")).collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    fn program(&self) -> &str {
        "xdotool"
    }

    async fn run(&self, args: Vec<String>) -> Result<String, AutomationError> {
        let subcommand = args.first().cloned().unwrap_or_default();
        let line = args.join(" ");
        lock(&self.calls).push(args);

        let line_failure = lock(&self.line_failures).get(&line).cloned();
        let failure = line_failure.or_else(|| lock(&self.failures).get(&subcommand).cloned());
        if let Some(stderr) = failure {
            return Err(AutomationError::Exited {
                program: self.program().to_string(),
                code: Some(1),
                stderr,
            });
        }
        Ok(lock(&self.stdout)
            .get(&subcommand)
            .cloned()
            .unwrap_or_default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
