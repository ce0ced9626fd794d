//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod change_notifier;
pub mod command_runner;
pub mod screen;

pub use change_notifier::{ChangeNotifier, Wakeup};
pub use command_runner::CommandRunner;
pub use screen::Screen;
