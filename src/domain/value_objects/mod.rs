//! Domain Value Objects
//!
//! Immutable value types that describe one watch cycle: what changed,
//! what to run, and how the run ended.

mod change_set;
mod command_spec;
mod hash;
mod run_outcome;

pub use change_set::ChangeSet;
pub use command_spec::CommandSpec;
pub use hash::ContentHash;
pub use run_outcome::RunOutcome;
