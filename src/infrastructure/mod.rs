//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `notifier/` - Native filesystem events via `notify`
//! - `runner` - Child processes via `std::process`
//! - `screen` - Terminal clearing via `crossterm`

pub mod notifier;
pub mod runner;
pub mod screen;

// Re-export for convenience
pub use notifier::{InterruptHandle, NotifierOptions, NotifyWatcher};
pub use runner::ProcessRunner;
pub use screen::TerminalScreen;
