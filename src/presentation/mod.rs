//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Merging CLI flags over the loaded configuration
//! - Creating the use case with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - The clap definition
//! - `factory` - Builds options, notifier, runner and screen (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use watch_rerun::presentation::{factory, Cli};
//!
//! let settings = factory::resolve_settings(&cli, loaded.config)?;
//! let use_case = factory::create_watch_use_case(&settings);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen};
pub use factory::{create_watch_use_case, resolve_settings, Settings};
