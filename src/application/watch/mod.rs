//! Watch Use Case
//!
//! Re-runs a command every time a watched path changes:
//! - Blocks on a `ChangeNotifier` (no polling)
//! - Clears the `Screen` and runs the command through a `CommandRunner`
//! - Coalesces changes made during a run into at most one follow-up run
//! - Stops on interrupt, fails on notifier errors
//!
//! ## Architecture
//!
//! - `WatchUseCase` - Drives the `LoopState` machine
//! - `WatchOptions` - Targets, command and per-cycle behavior
//! - `WatchEvent` - Events emitted for the UI (human or NDJSON)
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(options);
//! use_case.validate()?;
//! use_case.start(&mut notifier, &mut runner, &mut screen, &running, |event| { ... })?;
//! ```

mod event;
mod use_case;


pub use event::{WatchEvent, WatchOptions};
pub use use_case::{WatchSummary, WatchUseCase};
