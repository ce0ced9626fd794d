//! Configuration module for watch-rerun
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (WATCH_RERUN_*)
//! 3. Project config (`.watch-rerun.toml`, or `--config` / `WATCH_RERUN_CONFIG`)
//! 4. User config (`<config dir>/watch-rerun/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE};
pub use types::{ColorMode, CommandConfig, Config, OutputConfig, WatchConfig};
