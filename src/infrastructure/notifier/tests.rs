//! Tests for the notify-backed change notifier

use super::classify::{Classifier, WatchTarget};
use super::watcher::{NotifierOptions, NotifyWatcher};
use crate::domain::ports::{ChangeNotifier, Wakeup};
use crate::error::RerunError;
use notify::event::{
    AccessKind, AccessMode, CreateKind, DataChange, EventKind, MetadataKind, ModifyKind,
    RemoveKind,
};
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn write_kind() -> EventKind {
    EventKind::Modify(ModifyKind::Data(DataChange::Content))
}

fn classifier(paths: &[PathBuf], ignore_unchanged: bool) -> Classifier {
    let targets = paths
        .iter()
        .map(|p| WatchTarget::resolve(p).unwrap())
        .collect();
    Classifier::new(targets, ignore_unchanged)
}

// === Classifier ===

#[test]
fn test_resolve_missing_path_is_not_found() {
    let dir = tempdir().unwrap();
    let err = WatchTarget::resolve(&dir.path().join("missing.py")).unwrap_err();
    assert!(matches!(err, RerunError::NotFound { .. }));
}

#[test]
fn test_content_write_on_file_target_is_a_change() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("test_models.py");
    fs::write(&file, "x = 1\n").unwrap();
    let canonical = file.canonicalize().unwrap();
    let mut c = classifier(&[file], false);

    let changes = c.classify(&write_kind(), &[canonical.clone()]).unwrap();
    assert!(changes.contains(&canonical));
}

#[test]
fn test_open_close_and_metadata_are_ignored() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("conftest.py");
    fs::write(&file, "").unwrap();
    let canonical = file.canonicalize().unwrap();
    let mut c = classifier(&[file], false);

    let open = EventKind::Access(AccessKind::Open(AccessMode::Any));
    let close = EventKind::Access(AccessKind::Close(AccessMode::Write));
    let chmod = EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions));
    for kind in [open, close, chmod] {
        assert!(c.classify(&kind, &[canonical.clone()]).unwrap().is_empty());
    }
}

#[test]
fn test_new_file_in_watched_directory_is_a_change() {
    let dir = tempdir().unwrap();
    let mut c = classifier(&[dir.path().to_path_buf()], false);
    let new_file = dir.path().canonicalize().unwrap().join("test_new.py");
    fs::write(&new_file, "").unwrap();

    let changes = c
        .classify(&EventKind::Create(CreateKind::File), &[new_file.clone()])
        .unwrap();
    assert!(changes.contains(&new_file));
}

#[test]
fn test_events_outside_targets_are_ignored() {
    let watched = tempdir().unwrap();
    let other = tempdir().unwrap();
    let mut c = classifier(&[watched.path().to_path_buf()], false);
    let stray = other.path().canonicalize().unwrap().join("stray.py");

    assert!(c.classify(&write_kind(), &[stray]).unwrap().is_empty());
}

#[test]
fn test_removed_target_is_watch_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("test_models.py");
    fs::write(&file, "").unwrap();
    let canonical = file.canonicalize().unwrap();
    let mut c = classifier(&[file.clone()], false);
    fs::remove_file(&file).unwrap();

    let err = c
        .classify(&EventKind::Remove(RemoveKind::File), &[canonical])
        .unwrap_err();
    assert!(matches!(err, RerunError::Watch { .. }));
    assert_eq!(err.path(), Some(file.as_path()));
}

#[test]
fn test_removal_inside_watched_directory_is_a_change() {
    let dir = tempdir().unwrap();
    let inner = dir.path().join("old_test.py");
    fs::write(&inner, "").unwrap();
    let canonical = inner.canonicalize().unwrap();
    let mut c = classifier(&[dir.path().to_path_buf()], false);
    fs::remove_file(&inner).unwrap();

    let changes = c
        .classify(&EventKind::Remove(RemoveKind::File), &[canonical.clone()])
        .unwrap();
    assert!(changes.contains(&canonical));
}

#[test]
fn test_ignore_unchanged_skips_identical_content() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("test_models.py");
    fs::write(&file, "assert 1\n").unwrap();
    let canonical = file.canonicalize().unwrap();
    let mut c = classifier(&[file.clone()], true);

    // Touch without changing bytes
    fs::write(&file, "assert 1\n").unwrap();
    assert!(c.classify(&write_kind(), &[canonical.clone()]).unwrap().is_empty());

    fs::write(&file, "assert 2\n").unwrap();
    assert!(!c.classify(&write_kind(), &[canonical.clone()]).unwrap().is_empty());

    // Same bytes as the last seen version
    assert!(c.classify(&write_kind(), &[canonical]).unwrap().is_empty());
}

// === NotifyWatcher ===

fn quick() -> NotifierOptions {
    NotifierOptions {
        debounce: Duration::from_millis(50),
        ..NotifierOptions::default()
    }
}

/// Interrupt the watcher after `secs` so a missed event fails the test
/// instead of hanging it
fn guard(watcher: &NotifyWatcher, secs: u64) {
    let handle = watcher.interrupt_handle();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(secs));
        handle.interrupt();
    });
}

#[test]
fn test_new_rejects_empty_targets() {
    let err = NotifyWatcher::new(&[], quick()).err().unwrap();
    assert!(matches!(err, RerunError::Configuration { .. }));
    assert_eq!(err.to_string(), "configuration error: no paths to watch");
}

#[test]
fn test_new_rejects_missing_target() {
    let dir = tempdir().unwrap();
    let err = NotifyWatcher::new(&[dir.path().join("nope")], quick())
        .err()
        .unwrap();
    assert!(matches!(err, RerunError::NotFound { .. }));
}

#[test]
fn test_interrupt_wakes_blocked_wait() {
    let dir = tempdir().unwrap();
    let mut watcher = NotifyWatcher::new(&[dir.path().to_path_buf()], quick()).unwrap();
    let handle = watcher.interrupt_handle();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        handle.interrupt();
    });

    assert_eq!(watcher.wait().unwrap(), Wakeup::Interrupted);
    // Stays interrupted
    assert_eq!(watcher.wait().unwrap(), Wakeup::Interrupted);
}

#[test]
fn test_write_to_watched_file_wakes_wait() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("test_models.py");
    fs::write(&file, "x = 1\n").unwrap();
    let mut watcher = NotifyWatcher::new(&[file.clone()], quick()).unwrap();
    guard(&watcher, 10);

    let writer_path = file.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        fs::write(&writer_path, "x = 2\n").unwrap();
    });

    match watcher.wait().unwrap() {
        Wakeup::Changed(changes) => {
            assert!(changes.contains(&file.canonicalize().unwrap()));
        }
        Wakeup::Interrupted => panic!("expected a change event before the guard fired"),
    }
}

#[test]
fn test_deleting_watched_file_is_watch_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("test_models.py");
    fs::write(&file, "x = 1\n").unwrap();
    let mut watcher = NotifyWatcher::new(&[file.clone()], quick()).unwrap();
    guard(&watcher, 10);

    thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        fs::remove_file(&file).unwrap();
    });

    let err = watcher.wait().unwrap_err();
    assert!(matches!(err, RerunError::Watch { .. }), "got {err:?}");
}

#[test]
fn test_take_pending_is_empty_when_nothing_happened() {
    let dir = tempdir().unwrap();
    let mut watcher = NotifyWatcher::new(&[dir.path().to_path_buf()], quick()).unwrap();
    assert_eq!(watcher.take_pending().unwrap(), None);
}

#[test]
fn test_take_pending_collects_writes_made_during_a_run() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("test_models.py");
    fs::write(&file, "x = 1\n").unwrap();
    let mut watcher = NotifyWatcher::new(&[dir.path().to_path_buf()], quick()).unwrap();

    // Two rapid writes while "the command runs"
    fs::write(&file, "x = 2\n").unwrap();
    fs::write(&file, "x = 3\n").unwrap();
    thread::sleep(Duration::from_millis(500));

    let pending = watcher.take_pending().unwrap().expect("writes were missed");
    assert_eq!(pending.len(), 1, "both writes coalesce into one path");
}

#[test]
fn test_writes_inside_debounce_window_share_one_wakeup() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("test_models.py");
    let second = dir.path().join("test_views.py");
    fs::write(&first, "x = 1\n").unwrap();
    fs::write(&second, "y = 1\n").unwrap();
    let options = NotifierOptions {
        debounce: Duration::from_millis(300),
        ..NotifierOptions::default()
    };
    let mut watcher = NotifyWatcher::new(&[dir.path().to_path_buf()], options).unwrap();
    guard(&watcher, 10);

    let (a, b) = (first.clone(), second.clone());
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        fs::write(&a, "x = 2\n").unwrap();
        thread::sleep(Duration::from_millis(20));
        fs::write(&b, "y = 2\n").unwrap();
    });

    match watcher.wait().unwrap() {
        Wakeup::Changed(changes) => {
            assert!(changes.contains(&first.canonicalize().unwrap()), "{changes:?}");
            assert!(changes.contains(&second.canonicalize().unwrap()), "{changes:?}");
        }
        Wakeup::Interrupted => panic!("expected a change event before the guard fired"),
    }
    assert_eq!(watcher.take_pending().unwrap(), None);
}

#[test]
fn test_take_pending_after_interrupt_owes_no_run() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("test_models.py");
    fs::write(&file, "x = 1\n").unwrap();
    let mut watcher = NotifyWatcher::new(&[dir.path().to_path_buf()], quick()).unwrap();

    // A write and Ctrl-C both land while the command runs
    fs::write(&file, "x = 2\n").unwrap();
    watcher.interrupt_handle().interrupt();
    thread::sleep(Duration::from_millis(300));

    assert_eq!(watcher.take_pending().unwrap(), None);
    assert_eq!(watcher.wait().unwrap(), Wakeup::Interrupted);
}
