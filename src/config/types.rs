//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CommandSpec;
use crate::error::RerunResult;

use super::loader::{self, ConfigWarning, LoadedConfig};

/// `[watch]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Paths watched when none are given on the command line
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Watch directories recursively
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Coalescing window after the first event, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Skip events that leave a file's content unchanged
    #[serde(default)]
    pub ignore_unchanged: bool,

    /// Run the command once before the first wait
    #[serde(default)]
    pub run_on_start: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            recursive: true,
            debounce_ms: default_debounce_ms(),
            ignore_unchanged: false,
            run_on_start: false,
        }
    }
}

/// `[command]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// How long an interrupted child may take to exit before it is killed
    #[serde(default = "default_kill_grace_ms")]
    pub kill_grace_ms: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            kill_grace_ms: default_kill_grace_ms(),
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Clear the terminal before each run
    #[serde(default = "default_true")]
    pub clear: bool,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clear: true,
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_program() -> String {
    "pytest".to_string()
}

fn default_kill_grace_ms() -> u64 {
    2000
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub command: CommandConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RerunResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> RerunResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve the config for a project: explicit file, project file,
    /// user file, or defaults, then environment overrides
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> RerunResult<LoadedConfig> {
        loader::discover(project_root, explicit)
    }

    /// The configured command
    pub fn command_spec(&self) -> RerunResult<CommandSpec> {
        CommandSpec::new(self.command.program.clone(), self.command.args.clone())
    }
}
