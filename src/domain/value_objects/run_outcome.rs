//! Run Outcome Value Object

use std::time::Duration;

/// How one command invocation ended.
///
/// A non-zero exit is a normal outcome, not an error of the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code, `None` when the child was ended by a signal
    pub exit_code: Option<i32>,
    /// Whether the child exited successfully
    pub success: bool,
    /// Wall-clock time the child ran for
    pub duration: Duration,
    /// The child was still running when an interrupt arrived
    pub interrupted: bool,
}

impl RunOutcome {
    /// Outcome of a child that exited with the given code
    pub fn exited(code: i32, duration: Duration) -> Self {
        Self {
            exit_code: Some(code),
            success: code == 0,
            duration,
            interrupted: false,
        }
    }

    /// Mark the outcome as cut short by an interrupt
    pub fn with_interrupted(mut self, interrupted: bool) -> Self {
        self.interrupted = interrupted;
        self
    }

    pub fn from_status(status: std::process::ExitStatus, duration: Duration) -> Self {
        Self {
            exit_code: status.code(),
            success: status.success(),
            duration,
            interrupted: false,
        }
    }
}
