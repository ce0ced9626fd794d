//! Change Notifier port - blocking wait for filesystem changes
//!
//! The loop never polls the filesystem itself. It asks the notifier to
//! block until something happens, and the notifier answers with either a
//! set of changed paths or the news that the process was interrupted.

use crate::domain::value_objects::ChangeSet;
use crate::error::RerunResult;

/// Why a blocked `wait` returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wakeup {
    /// One or more watched paths changed
    Changed(ChangeSet),
    /// An interrupt arrived while waiting
    Interrupted,
}

/// Abstract filesystem change notifier
///
/// Implementations:
/// - `NotifyWatcher` - backed by the platform's native file events
/// - scripted fakes in tests
pub trait ChangeNotifier {
    /// Block until a watched path changes or an interrupt arrives.
    ///
    /// Errors are fatal: a notifier that has lost its watches must not
    /// keep the loop alive.
    fn wait(&mut self) -> RerunResult<Wakeup>;

    /// Collect changes that arrived since the last `wait`, without
    /// blocking. Used after a run to decide whether one follow-up run is
    /// owed. Returns `None` once an interrupt has been seen.
    fn take_pending(&mut self) -> RerunResult<Option<ChangeSet>>;
}
