//! watch-rerun - re-run a test command whenever watched files change
//!
//! watch-rerun blocks on filesystem notifications for a set of paths, clears
//! the terminal and runs a command (by default `pytest`) on every change,
//! until interrupted.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{WatchEvent, WatchOptions, WatchSummary, WatchUseCase};
pub use config::{ColorMode, Config};
pub use domain::state::{LoopState, TerminationReason};
pub use domain::value_objects::{ChangeSet, CommandSpec, RunOutcome};
pub use error::{RerunError, RerunResult};
