//! Turning raw `notify` events into change sets

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind};

use crate::domain::value_objects::{ChangeSet, ContentHash};
use crate::error::{RerunError, RerunResult};

/// A canonicalized watch target
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WatchTarget {
    /// Path as the user gave it, used in messages
    pub(crate) given: PathBuf,
    /// Canonical path, matched against event paths
    pub(crate) canonical: PathBuf,
    pub(crate) is_dir: bool,
}

impl WatchTarget {
    pub(crate) fn resolve(path: &Path) -> RerunResult<Self> {
        if !path.exists() {
            return Err(RerunError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let canonical = path.canonicalize()?;
        Ok(Self {
            given: path.to_path_buf(),
            is_dir: canonical.is_dir(),
            canonical,
        })
    }

    fn covers(&self, path: &Path) -> bool {
        if self.is_dir {
            path.starts_with(&self.canonical)
        } else {
            path == self.canonical
        }
    }
}

/// Classifies events against the targets and, optionally, file content
#[derive(Debug)]
pub(crate) struct Classifier {
    targets: Vec<WatchTarget>,
    hashes: Option<HashMap<PathBuf, ContentHash>>,
}

impl Classifier {
    pub(crate) fn new(targets: Vec<WatchTarget>, ignore_unchanged: bool) -> Self {
        let hashes = ignore_unchanged.then(|| {
            targets
                .iter()
                .filter(|t| !t.is_dir)
                .filter_map(|t| ContentHash::of_file(&t.canonical).map(|h| (t.canonical.clone(), h)))
                .collect()
        });
        Self { targets, hashes }
    }

    pub(crate) fn targets(&self) -> &[WatchTarget] {
        &self.targets
    }

    /// Decide what one raw event means for the loop.
    ///
    /// Returns the changed paths (possibly empty), or a watch error when a
    /// target itself has disappeared: with its watch gone the loop would
    /// otherwise sit idle forever.
    pub(crate) fn classify(&mut self, kind: &EventKind, paths: &[PathBuf]) -> RerunResult<ChangeSet> {
        if let Some(lost) = self.lost_target(kind, paths) {
            return Err(RerunError::watch_path(
                "watched path was removed or renamed",
                lost,
            ));
        }

        let mut changes = ChangeSet::new();
        if !is_content_event(kind) {
            return Ok(changes);
        }

        for path in paths {
            if !self.targets.iter().any(|t| t.covers(path)) {
                tracing::trace!(path = %path.display(), "event outside watch targets");
                continue;
            }
            if self.unchanged(kind, path) {
                tracing::debug!(path = %path.display(), "content unchanged, skipping");
                continue;
            }
            changes.insert(path.clone());
        }
        Ok(changes)
    }

    /// A target that was removed or renamed away, by event or by absence.
    ///
    /// A removal event on a target counts even if the path exists again
    /// (atomic save by rename): the native watch went with the old inode.
    fn lost_target(&self, kind: &EventKind, paths: &[PathBuf]) -> Option<PathBuf> {
        let removed = |t: &WatchTarget| match kind {
            EventKind::Remove(_) => paths.iter().any(|p| p == &t.canonical),
            EventKind::Modify(ModifyKind::Name(_)) => {
                paths.iter().any(|p| p == &t.canonical) && !t.canonical.exists()
            }
            _ => false,
        };
        self.targets
            .iter()
            .find(|t| removed(t) || !t.canonical.exists())
            .map(|t| t.given.clone())
    }

    fn unchanged(&mut self, kind: &EventKind, path: &Path) -> bool {
        let Some(hashes) = self.hashes.as_mut() else {
            return false;
        };
        if matches!(kind, EventKind::Remove(_)) {
            hashes.remove(path);
            return false;
        }
        match ContentHash::of_file(path) {
            Some(hash) => {
                if hashes.get(path) == Some(&hash) {
                    tracing::trace!(path = %path.display(), %hash, "content unchanged");
                    true
                } else {
                    hashes.insert(path.to_path_buf(), hash);
                    false
                }
            }
            None => false,
        }
    }
}

/// Content writes, creations, removals and renames count; reads,
/// open/close and metadata-only changes do not
fn is_content_event(kind: &EventKind) -> bool {
    !matches!(
        kind,
        EventKind::Access(_) | EventKind::Modify(ModifyKind::Metadata(_))
    )
}
