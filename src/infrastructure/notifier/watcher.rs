//! `NotifyWatcher`: the `ChangeNotifier` used by the binary

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{ChangeNotifier, Wakeup};
use crate::domain::value_objects::ChangeSet;
use crate::error::{RerunError, RerunResult};

use super::classify::{Classifier, WatchTarget};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Notifier options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierOptions {
    /// Watch directories recursively
    pub recursive: bool,
    /// Window after the first event during which further events coalesce
    pub debounce: Duration,
    /// Skip events that leave a file's bytes unchanged
    pub ignore_unchanged: bool,
}

impl Default for NotifierOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            ignore_unchanged: false,
        }
    }
}

/// Messages on the notifier channel
#[derive(Debug)]
enum Signal {
    Fs(notify::Result<Event>),
    Interrupt,
}

/// Wakes a blocked `NotifyWatcher::wait` from another thread (Ctrl-C handler)
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    tx: Sender<Signal>,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        // The watcher may already be gone during shutdown
        let _ = self.tx.send(Signal::Interrupt);
    }
}

/// What one signal meant
enum Step {
    Changed(ChangeSet),
    Interrupted,
    Ignored,
}

/// Filesystem change notifier over `notify::RecommendedWatcher`
pub struct NotifyWatcher {
    // Dropping the watcher removes every native watch
    _watcher: RecommendedWatcher,
    tx: Sender<Signal>,
    rx: Receiver<Signal>,
    classifier: Classifier,
    debounce: Duration,
    interrupted: bool,
}

impl NotifyWatcher {
    /// Start watching `paths`.
    ///
    /// Fails with `Configuration` for an empty list, `NotFound` for a
    /// missing path, and `Watch` if the platform refuses a watch.
    pub fn new(paths: &[PathBuf], options: NotifierOptions) -> RerunResult<Self> {
        if paths.is_empty() {
            return Err(RerunError::configuration("no paths to watch"));
        }
        let targets = paths
            .iter()
            .map(|p| WatchTarget::resolve(p))
            .collect::<RerunResult<Vec<_>>>()?;

        let (tx, rx) = channel();
        let event_tx = tx.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = event_tx.send(Signal::Fs(res));
            },
            Config::default(),
        )?;

        for target in &targets {
            let mode = if target.is_dir && options.recursive {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher.watch(&target.canonical, mode)?;
            tracing::debug!(path = %target.canonical.display(), ?mode, "watching");
        }

        Ok(Self {
            _watcher: watcher,
            tx,
            rx,
            classifier: Classifier::new(targets, options.ignore_unchanged),
            debounce: options.debounce,
            interrupted: false,
        })
    }

    /// Handle for waking `wait` on interrupt
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            tx: self.tx.clone(),
        }
    }

    /// The watched paths, as given
    pub fn watched(&self) -> Vec<PathBuf> {
        self.classifier
            .targets()
            .iter()
            .map(|t| t.given.clone())
            .collect()
    }

    fn handle(&mut self, signal: Signal) -> RerunResult<Step> {
        match signal {
            Signal::Interrupt => {
                self.interrupted = true;
                Ok(Step::Interrupted)
            }
            Signal::Fs(Err(err)) => Err(err.into()),
            Signal::Fs(Ok(event)) => {
                tracing::trace!(kind = ?event.kind, paths = ?event.paths, "raw event");
                let changes = self.classifier.classify(&event.kind, &event.paths)?;
                Ok(match changes.non_empty() {
                    Some(changes) => Step::Changed(changes),
                    None => Step::Ignored,
                })
            }
        }
    }

    /// Keep collecting events until the debounce window after the first
    /// one closes
    fn debounce(&mut self, mut changes: ChangeSet) -> RerunResult<Wakeup> {
        let deadline = Instant::now() + self.debounce;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(Wakeup::Changed(changes));
            }
            match self.rx.recv_timeout(remaining) {
                Ok(signal) => match self.handle(signal)? {
                    Step::Changed(more) => changes.merge(more),
                    Step::Interrupted => return Ok(Wakeup::Interrupted),
                    Step::Ignored => {}
                },
                Err(RecvTimeoutError::Timeout) => return Ok(Wakeup::Changed(changes)),
                Err(RecvTimeoutError::Disconnected) => return Err(disconnected()),
            }
        }
    }
}

impl ChangeNotifier for NotifyWatcher {
    fn wait(&mut self) -> RerunResult<Wakeup> {
        if self.interrupted {
            return Ok(Wakeup::Interrupted);
        }
        loop {
            let signal = self.rx.recv().map_err(|_| disconnected())?;
            match self.handle(signal)? {
                Step::Changed(changes) => return self.debounce(changes),
                Step::Interrupted => return Ok(Wakeup::Interrupted),
                Step::Ignored => {}
            }
        }
    }

    fn take_pending(&mut self) -> RerunResult<Option<ChangeSet>> {
        let mut pending = ChangeSet::new();
        loop {
            match self.rx.try_recv() {
                Ok(signal) => match self.handle(signal)? {
                    Step::Changed(changes) => pending.merge(changes),
                    // Remembered in `self.interrupted`; the next `wait` reports it
                    Step::Interrupted | Step::Ignored => {}
                },
                // Changes collected alongside an interrupt are owed no run
                Err(TryRecvError::Empty) if self.interrupted => return Ok(None),
                Err(TryRecvError::Empty) => return Ok(pending.non_empty()),
                Err(TryRecvError::Disconnected) => return Err(disconnected()),
            }
        }
    }
}

fn disconnected() -> RerunError {
    RerunError::watch("change notifier stopped delivering events")
}
