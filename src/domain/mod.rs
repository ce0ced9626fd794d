//! Domain Layer
//!
//! Pure watch-and-rerun logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ChangeSet, CommandSpec, RunOutcome)
//! - `state` - The Waiting / Running / Terminated state machine
//! - `ports/` - Interface definitions for infrastructure

pub mod ports;
pub mod state;
pub mod value_objects;
