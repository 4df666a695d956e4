use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::AutomationError;

/// Runs one invocation of the automation tool and returns its stdout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    fn program(&self) -> &str;
    async fn run(&self, args: Vec<String>) -> Result<String, AutomationError>;
}

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: Vec<String>) -> Result<String, AutomationError> {
        debug!(program = %self.program, ?args, "spawning");
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| AutomationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AutomationError::Exited {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
