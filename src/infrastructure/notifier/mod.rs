//! Change notifier backed by the `notify` crate
//!
//! - One `RecommendedWatcher` for all targets
//! - Events and interrupts share a single channel, so a blocked `wait`
//!   wakes for either without polling
//! - Events arriving within the debounce window join the same change set

mod classify;
#[cfg(test)]
mod tests;
mod watcher;

pub use watcher::{InterruptHandle, NotifierOptions, NotifyWatcher};
