//! Change Set Value Object
//!
//! The paths seen changing since the last cycle began. Any non-empty set
//! triggers exactly one run; the paths are only reported, never queued.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// De-duplicated, ordered set of changed paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: BTreeSet<PathBuf>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a change set holding a single path
    pub fn single(path: impl Into<PathBuf>) -> Self {
        let mut set = Self::new();
        set.insert(path);
        set
    }

    /// Record a changed path. Returns false if it was already present.
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(path.into())
    }

    /// Fold another change set into this one
    pub fn merge(&mut self, other: ChangeSet) {
        self.paths.extend(other.paths);
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// `Some(self)` when non-empty, so callers can treat "nothing changed"
    /// and "no change set" the same way
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl FromIterator<PathBuf> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ChangeSet {
    type Item = PathBuf;
    type IntoIter = std::collections::btree_set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_writes_to_one_file_coalesce() {
        let mut set = ChangeSet::new();
        assert!(set.insert("tests/test_models.py"));
        assert!(!set.insert("tests/test_models.py"));
        assert!(!set.insert("tests/test_models.py"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn merge_unions_paths() {
        let mut a = ChangeSet::single("a.py");
        let b: ChangeSet = vec![PathBuf::from("a.py"), PathBuf::from("b.py")]
            .into_iter()
            .collect();
        a.merge(b);
        let paths: Vec<_> = a.iter().collect();
        assert_eq!(paths, vec![Path::new("a.py"), Path::new("b.py")]);
    }

    #[test]
    fn non_empty_filters_empty_sets() {
        assert!(ChangeSet::new().non_empty().is_none());
        assert!(ChangeSet::single("x").non_empty().is_some());
    }
}
