//! Watch event types and options

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::{CommandSpec, RunOutcome};

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Paths to watch, in the order given
    pub targets: Vec<PathBuf>,
    /// Command run on every cycle
    pub command: CommandSpec,
    /// Clear the screen before each run
    pub clear: bool,
    /// Run once before the first wait
    pub run_on_start: bool,
}

impl WatchOptions {
    /// Create new watch options with minimal required fields
    pub fn new(targets: Vec<PathBuf>, command: CommandSpec) -> Self {
        Self {
            targets,
            command,
            clear: true,
            run_on_start: false,
        }
    }

    /// Set whether to clear the screen before each run
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Set whether to run the command once at start-up
    pub fn with_run_on_start(mut self, run_on_start: bool) -> Self {
        self.run_on_start = run_on_start;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watching started
    WatchStarted {
        watching: Vec<String>,
        command: String,
    },
    /// A watched path changed (one per path in the triggering change set)
    FileChanged { path: String },
    /// Command started for a cycle
    RunStarted { cycle: u64, command: String },
    /// Command exited; a non-zero code is a normal outcome
    RunFinished {
        cycle: u64,
        exit_code: Option<i32>,
        success: bool,
        duration_ms: u64,
        interrupted: bool,
    },
    /// Command could not be started (e.g. not on PATH)
    RunFailedToStart { cycle: u64, message: String },
    /// Fatal error
    Error { message: String },
    /// Watch stopped
    Shutdown { cycles: u64 },
}

impl WatchEvent {
    pub fn run_finished(cycle: u64, outcome: &RunOutcome) -> Self {
        WatchEvent::RunFinished {
            cycle,
            exit_code: outcome.exit_code,
            success: outcome.success,
            duration_ms: duration_ms(outcome.duration),
            interrupted: outcome.interrupted,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
