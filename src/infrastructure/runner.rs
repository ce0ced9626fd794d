//! `ProcessRunner`: runs the test command as a child process

use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ports::CommandRunner;
use crate::domain::value_objects::{CommandSpec, RunOutcome};

/// How often the child is checked while the process is still live
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs commands with inherited stdio, one at a time
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    kill_grace: Duration,
    working_dir: Option<PathBuf>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl ProcessRunner {
    /// `kill_grace` is how long an interrupted child may keep running
    /// before it is killed
    pub fn new(kill_grace: Duration) -> Self {
        Self {
            kill_grace,
            working_dir: None,
        }
    }

    /// Run the command in `dir` instead of the current directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &CommandSpec, running: &AtomicBool) -> io::Result<RunOutcome> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let started = Instant::now();
        let mut child = cmd.spawn()?;
        tracing::debug!(pid = child.id(), command = %command, "spawned");

        // On interrupt the child gets SIGINT from us as well, since the
        // signal may have been sent to our pid alone. If it is still alive
        // after the grace period, kill it.
        let mut interrupted_at: Option<Instant> = None;
        loop {
            if let Some(status) = child.try_wait()? {
                let outcome = RunOutcome::from_status(status, started.elapsed())
                    .with_interrupted(interrupted_at.is_some() || !running.load(Ordering::SeqCst));
                tracing::debug!(code = ?outcome.exit_code, "child exited");
                return Ok(outcome);
            }

            if !running.load(Ordering::SeqCst) {
                let since = match interrupted_at {
                    Some(since) => since,
                    None => {
                        forward_interrupt(&child);
                        *interrupted_at.insert(Instant::now())
                    }
                };
                if since.elapsed() >= self.kill_grace {
                    tracing::warn!(pid = child.id(), "child ignored interrupt, killing");
                    // Already exited between try_wait and kill is fine
                    let _ = child.kill();
                    let status = child.wait()?;
                    return Ok(RunOutcome::from_status(status, started.elapsed())
                        .with_interrupted(true));
                }
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(unix)]
fn forward_interrupt(child: &Child) {
    let Ok(pid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: the child has not been reaped yet, so its pid cannot be reused
    if unsafe { libc::kill(pid, libc::SIGINT) } != 0 {
        tracing::debug!(pid, error = %io::Error::last_os_error(), "could not forward interrupt");
    }
}

#[cfg(not(unix))]
fn forward_interrupt(_child: &Child) {}
