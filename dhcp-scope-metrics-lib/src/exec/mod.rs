//! Execution of PowerShell commands
//!
//! The query layer never launches processes itself. It hands command text to an
//! [`Executor`] and receives the combined standard output and standard error bytes,
//! or an [`ExecutionFailure`] when the process could not be launched, exited
//! abnormally, or ran past its deadline. A failure may still carry output.
//!
//! [`PowerShell`] is the production executor; tests substitute scripted ones.

mod powershell;

pub use powershell::{DEFAULT_ARGS, DEFAULT_PROGRAM, PowerShell};

use bytes::Bytes;
use thiserror::Error;

/// Runs a command line and returns what it printed.
pub trait Executor: Send + Sync {
    fn execute(&self, command: &str) -> impl Future<Output = Result<Bytes, ExecutionFailure>> + Send;
}

/// The external process could not be launched, exited abnormally, or timed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ExecutionFailure {
    pub reason: String,

    /// Combined output captured before the failure, possibly empty.
    pub output: Bytes,
}

impl ExecutionFailure {
    #[must_use]
    pub fn new(reason: impl Into<String>, output: impl Into<Bytes>) -> Self {
        Self {
            reason: reason.into(),
            output: output.into(),
        }
    }
}
