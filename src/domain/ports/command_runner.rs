//! Command Runner port - run the external test command to completion

use std::sync::atomic::AtomicBool;

use crate::domain::value_objects::{CommandSpec, RunOutcome};

/// Abstract command runner
///
/// The runner owns the child for the whole call; no two runs overlap.
pub trait CommandRunner {
    /// Run `command` synchronously with inherited stdio.
    ///
    /// `running` drops to false when the process is interrupted; the
    /// runner must then let the child wind down and return with
    /// `RunOutcome::interrupted` set.
    ///
    /// An `Err` means the command could not be started at all.
    fn run(&mut self, command: &CommandSpec, running: &AtomicBool) -> std::io::Result<RunOutcome>;
}
