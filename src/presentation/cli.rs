//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Paths come first; the command follows `--` so its own flags are never
//!   taken for ours
//! - Every flag is optional and falls back to the configuration file

use std::path::PathBuf;

use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// watch-rerun - clear the terminal and re-run a test command on every change
#[derive(Parser, Debug)]
#[command(name = "watch-rerun")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: watch-rerun src tests -- pytest -x -q")]
pub struct Cli {
    /// Paths to watch (defaults to `watch.paths` from the config file)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Command to run (defaults to `command` from the config file, then `pytest`)
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,

    /// Do not clear the terminal before each run
    #[arg(long)]
    pub no_clear: bool,

    /// Coalescing window in milliseconds
    #[arg(long, value_name = "MS")]
    pub debounce: Option<u64>,

    /// Run the command once before waiting for changes
    #[arg(long)]
    pub run_on_start: bool,

    /// Skip events that do not change file content
    #[arg(long)]
    pub ignore_unchanged: bool,

    /// Explicit config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output events as NDJSON
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
