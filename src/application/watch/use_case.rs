//! Watch Use Case implementation

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::ports::{ChangeNotifier, CommandRunner, Screen, Wakeup};
use crate::domain::state::{LoopState, TerminationReason};
use crate::domain::value_objects::ChangeSet;
use crate::error::{RerunError, RerunResult};

use super::event::{WatchEvent, WatchOptions};

/// How a watch session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    /// Cycles whose command finished (or failed to start)
    pub cycles: u64,
    pub reason: TerminationReason,
}

/// Watch Use Case
///
/// Orchestrates waiting, clearing and re-running.
/// This is the main entry point for the `watch-rerun` binary.
pub struct WatchUseCase {
    options: WatchOptions,
}

impl WatchUseCase {
    /// Create a new WatchUseCase
    pub fn new(options: WatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start-up checks, done before any watch is created or command run
    pub fn validate(&self) -> RerunResult<()> {
        if self.options.targets.is_empty() {
            return Err(RerunError::configuration("no paths to watch"));
        }
        if let Some(missing) = self.options.targets.iter().find(|p| !p.exists()) {
            return Err(RerunError::NotFound {
                path: missing.clone(),
            });
        }
        Ok(())
    }

    /// Start watching (blocking)
    ///
    /// Returns `Ok` once `running` drops (or the notifier reports an
    /// interrupt) and `Err` if the notifier fails. Use the callback to
    /// receive events.
    pub fn start<N, R, S, F>(
        &self,
        notifier: &mut N,
        runner: &mut R,
        screen: &mut S,
        running: &AtomicBool,
        on_event: F,
    ) -> RerunResult<WatchSummary>
    where
        N: ChangeNotifier,
        R: CommandRunner,
        S: Screen,
        F: Fn(WatchEvent),
    {
        self.validate()?;

        on_event(WatchEvent::WatchStarted {
            watching: self
                .options
                .targets
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            command: self.options.command.to_string(),
        });

        let mut state = if self.options.run_on_start {
            LoopState::start_running()
        } else {
            LoopState::initial()
        };

        loop {
            state = match state {
                LoopState::Waiting { .. } => {
                    if !running.load(Ordering::SeqCst) {
                        state.on_wakeup(Wakeup::Interrupted)
                    } else {
                        match notifier.wait() {
                            Ok(wakeup) => state.on_wakeup(wakeup),
                            Err(err) => return Err(self.fail(state, err, &on_event)),
                        }
                    }
                }
                // Never launch a command once Ctrl-C has been seen
                LoopState::Running { .. } if !running.load(Ordering::SeqCst) => {
                    state.on_interrupt()
                }
                LoopState::Running { cycle, trigger } => {
                    let interrupted =
                        self.run_cycle(cycle, trigger, runner, screen, running, &on_event);
                    let interrupted = interrupted || !running.load(Ordering::SeqCst);

                    let pending = if interrupted {
                        None
                    } else {
                        match notifier.take_pending() {
                            Ok(pending) => pending,
                            Err(err) => {
                                let finished = LoopState::Waiting { completed: cycle };
                                return Err(self.fail(finished, err, &on_event));
                            }
                        }
                    };
                    // Ctrl-C may land while pending changes are collected
                    let interrupted = interrupted || !running.load(Ordering::SeqCst);
                    if pending.is_some() && !interrupted {
                        tracing::info!(cycle, "changes arrived during run, running again");
                    }
                    LoopState::after_run(cycle, interrupted, pending)
                }
                LoopState::Terminated { completed, reason } => {
                    tracing::info!(cycles = completed, ?reason, "watch stopped");
                    on_event(WatchEvent::Shutdown { cycles: completed });
                    return Ok(WatchSummary {
                        cycles: completed,
                        reason,
                    });
                }
            };
        }
    }

    /// One Running step: clear, report, run. Returns whether the run was
    /// cut short by an interrupt.
    fn run_cycle<R, S, F>(
        &self,
        cycle: u64,
        trigger: ChangeSet,
        runner: &mut R,
        screen: &mut S,
        running: &AtomicBool,
        on_event: &F,
    ) -> bool
    where
        R: CommandRunner,
        S: Screen,
        F: Fn(WatchEvent),
    {
        if self.options.clear {
            if let Err(err) = screen.clear() {
                tracing::warn!(error = %err, "failed to clear terminal");
            }
        }

        for path in trigger {
            on_event(WatchEvent::FileChanged {
                path: path.display().to_string(),
            });
        }

        let command = &self.options.command;
        tracing::info!(cycle, %command, "running");
        on_event(WatchEvent::RunStarted {
            cycle,
            command: command.to_string(),
        });

        match runner.run(command, running) {
            Ok(outcome) => {
                on_event(WatchEvent::run_finished(cycle, &outcome));
                outcome.interrupted
            }
            Err(err) => {
                tracing::warn!(error = %err, %command, "command failed to start");
                on_event(WatchEvent::RunFailedToStart {
                    cycle,
                    message: format!("failed to start '{}': {}", command.program(), err),
                });
                false
            }
        }
    }

    /// Terminate on a notifier failure: report it, emit shutdown, and hand
    /// the error back for the caller to return
    fn fail<F>(&self, state: LoopState, err: RerunError, on_event: &F) -> RerunError
    where
        F: Fn(WatchEvent),
    {
        let terminated = state.on_watch_failed();
        tracing::debug!(?terminated, "notifier failed");
        on_event(WatchEvent::Error {
            message: err.to_string(),
        });
        on_event(WatchEvent::Shutdown {
            cycles: terminated.completed(),
        });
        err
    }
}
