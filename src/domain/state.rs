//! Loop state machine
//!
//! The rerun loop alternates between two states forever:
//!
//! ```text
//!            Changed              finished, nothing pending
//! Waiting ───────────► Running ─────────────────────────► Waiting
//!    │                  │  ▲
//!    │ Interrupted      │  │ finished, changes pending
//!    ▼                  │  └──────────┘
//! Terminated ◄──────────┘ interrupted
//! ```
//!
//! Transitions are pure so every cancellation point can be tested
//! without a filesystem or a child process.

use crate::domain::ports::Wakeup;
use crate::domain::value_objects::ChangeSet;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Ctrl-C (or another interrupt) arrived
    Interrupted,
    /// The change notifier failed
    WatchFailed,
}

/// State of the rerun loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    /// Blocked on the change notifier
    Waiting { completed: u64 },
    /// Running the command for cycle `cycle`
    Running { cycle: u64, trigger: ChangeSet },
    /// Stopped; absorbs every further input
    Terminated {
        completed: u64,
        reason: TerminationReason,
    },
}

impl Default for LoopState {
    fn default() -> Self {
        Self::initial()
    }
}

impl LoopState {
    /// Waiting, with no cycles run yet
    pub fn initial() -> Self {
        LoopState::Waiting { completed: 0 }
    }

    /// Running immediately, used for `run_on_start`
    pub fn start_running() -> Self {
        LoopState::Running {
            cycle: 1,
            trigger: ChangeSet::new(),
        }
    }

    /// Number of cycles whose command has finished
    pub fn completed(&self) -> u64 {
        match self {
            LoopState::Waiting { completed } | LoopState::Terminated { completed, .. } => {
                *completed
            }
            LoopState::Running { cycle, .. } => cycle - 1,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, LoopState::Terminated { .. })
    }

    /// Transition on a notifier wake-up.
    ///
    /// Only meaningful while `Waiting`; any other state is returned as is.
    pub fn on_wakeup(self, wakeup: Wakeup) -> Self {
        match (self, wakeup) {
            (LoopState::Waiting { completed }, Wakeup::Changed(trigger)) => LoopState::Running {
                cycle: completed + 1,
                trigger,
            },
            (LoopState::Waiting { completed }, Wakeup::Interrupted) => LoopState::Terminated {
                completed,
                reason: TerminationReason::Interrupted,
            },
            (other, _) => other,
        }
    }

    /// Transition when the command of the current cycle exits.
    ///
    /// Only meaningful while `Running`; any other state is returned as is.
    pub fn on_run_finished(self, interrupted: bool, pending: Option<ChangeSet>) -> Self {
        match self {
            LoopState::Running { cycle, .. } => Self::after_run(cycle, interrupted, pending),
            other => other,
        }
    }

    /// State after the command of `cycle` exits.
    ///
    /// An interrupt wins over pending changes: no new cycle starts once
    /// the process has been asked to stop.
    pub fn after_run(cycle: u64, interrupted: bool, pending: Option<ChangeSet>) -> Self {
        if interrupted {
            LoopState::Terminated {
                completed: cycle,
                reason: TerminationReason::Interrupted,
            }
        } else if let Some(trigger) = pending.and_then(ChangeSet::non_empty) {
            LoopState::Running {
                cycle: cycle + 1,
                trigger,
            }
        } else {
            LoopState::Waiting { completed: cycle }
        }
    }

    /// Transition on an interrupt seen outside a notifier wake-up.
    ///
    /// A `Running` state whose command has not been launched yet ends
    /// without counting its cycle.
    pub fn on_interrupt(self) -> Self {
        self.terminate(TerminationReason::Interrupted)
    }

    /// Transition on a notifier failure, from any live state
    pub fn on_watch_failed(self) -> Self {
        self.terminate(TerminationReason::WatchFailed)
    }

    fn terminate(self, reason: TerminationReason) -> Self {
        match self {
            LoopState::Terminated { .. } => self,
            other => LoopState::Terminated {
                completed: other.completed(),
                reason,
            },
        }
    }
}
