use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::common::errors::{SweepError, SweepResult};

/// Default time an OS maintenance command may run before it is killed
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A best-effort OS action run after all categories are cleaned.
pub trait MaintenanceAction: Send {
    /// Name reported as the event's category
    fn label(&self) -> &str;

    /// Perform the action. An error means the action is left out of the
    /// event stream; it never fails the pass.
    fn run(&self) -> SweepResult<()>;
}

/// Runs an external program, discarding its output.
///
/// Completion counts as success whatever the exit status; only a spawn
/// failure or a timeout is an error.
#[derive(Debug, Clone)]
pub struct CommandAction {
    label: String,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAction {
    pub fn new<I, S>(label: &str, program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.to_string(),
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn failure(&self, message: impl Into<String>) -> SweepError {
        SweepError::Maintenance {
            action: self.label.clone(),
            message: message.into(),
        }
    }
}

impl MaintenanceAction for CommandAction {
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&self) -> SweepResult<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.failure(format!("cannot start {}: {}", self.program, e)))?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    tracing::debug!("{} exited with {}", self.program, status);
                    return Ok(());
                }
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.failure(format!(
                        "{} timed out after {:?}",
                        self.program, self.timeout
                    )));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(self.failure(e.to_string())),
            }
        }
    }
}
