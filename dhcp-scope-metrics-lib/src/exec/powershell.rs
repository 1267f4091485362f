use super::{ExecutionFailure, Executor};
use bytes::{Bytes, BytesMut};
use core::time::Duration;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

const LOG_TARGET: &str = "powershell";

pub const DEFAULT_PROGRAM: &str = "powershell.exe";
pub const DEFAULT_ARGS: &[&str] = &["-nologo", "-noprofile", "-command"];

/// Runs each command through a fresh PowerShell process.
///
/// The command text is passed as the final argument after `args`. Standard output and
/// standard error are captured into one buffer, stdout first. The child is killed if
/// it outlives `timeout`.
#[derive(Debug, Clone)]
pub struct PowerShell {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl PowerShell {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_ARGS.iter().map(ToString::to_string).collect(), timeout)
    }
}

impl Executor for PowerShell {
    async fn execute(&self, command: &str) -> Result<Bytes, ExecutionFailure> {
        let start_time = Instant::now();

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutionFailure::new(format!("could not launch '{}': {e}", self.program), Bytes::new()))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ExecutionFailure::new(format!("'{}' failed to run: {e}", self.program), Bytes::new()));
            }
            Err(_) => {
                return Err(ExecutionFailure::new(
                    format!("'{}' timed out after {:.3}s", self.program, self.timeout.as_secs_f64()),
                    Bytes::new(),
                ));
            }
        };

        log::trace!(target: LOG_TARGET, "'{}' finished in {:.3}s with {}", self.program, start_time.elapsed().as_secs_f64(), output.status);

        let mut combined = BytesMut::with_capacity(output.stdout.len() + output.stderr.len());
        combined.extend_from_slice(&output.stdout);
        combined.extend_from_slice(&output.stderr);
        let combined = combined.freeze();

        if output.status.success() {
            Ok(combined)
        } else {
            Err(ExecutionFailure::new(format!("'{}' exited with {}", self.program, output.status), combined))
        }
    }
}
