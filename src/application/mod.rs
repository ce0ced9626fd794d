//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (state machine, value objects, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `WatchUseCase` - Wait for changes, clear, run the command, repeat

pub mod watch;

pub use watch::{WatchEvent, WatchOptions, WatchSummary, WatchUseCase};
