//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::CommandSpec;
use crate::error::{RerunError, RerunResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::{ColorMode, Config};

/// File name of the per-project config, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".watch-rerun.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A resolved configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// The file the config was read from, `None` for built-in defaults
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> RerunResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| RerunError::ConfigFile {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration for `project_root`.
///
/// The first existing file wins: explicit path (`--config` or
/// `WATCH_RERUN_CONFIG`), then the project file, then the user file.
/// An explicit path that does not exist is an error; missing project
/// and user files just fall through to defaults.
pub fn discover(project_root: &Path, explicit: Option<&Path>) -> RerunResult<LoadedConfig> {
    discover_with(project_root, explicit, &|key| std::env::var(key).ok())
}

pub(crate) fn discover_with(
    project_root: &Path,
    explicit: Option<&Path>,
    get_env: &dyn Fn(&str) -> Option<String>,
) -> RerunResult<LoadedConfig> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| get_env("WATCH_RERUN_CONFIG").map(PathBuf::from));

    let source = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(RerunError::configuration(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => {
            let project = project_root.join(PROJECT_CONFIG_FILE);
            if project.is_file() {
                Some(project)
            } else {
                user_config_path(get_env).filter(|p| p.is_file())
            }
        }
    };

    let (mut config, warnings) = match &source {
        Some(path) => load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };

    // Relative watch paths in a file are relative to that file
    if let Some(base) = source.as_deref().and_then(Path::parent) {
        config.watch.paths = config
            .watch
            .paths
            .into_iter()
            .map(|p| if p.is_relative() { base.join(p) } else { p })
            .collect();
    }

    let config = with_env_overrides_from(config, get_env, &mut std::io::stderr());

    Ok(LoadedConfig {
        config,
        warnings,
        source,
    })
}

/// Apply environment variable overrides (WATCH_RERUN_* prefix), writing
/// warnings for invalid values to `writer`
pub(crate) fn with_env_overrides_from<W: std::io::Write>(
    mut config: Config,
    get_env: &dyn Fn(&str) -> Option<String>,
    writer: &mut W,
) -> Config {
    // WATCH_RERUN_COMMAND (whitespace-separated)
    if let Some(line) = get_env("WATCH_RERUN_COMMAND") {
        let spec = EnvVarValidator::new("WATCH_RERUN_COMMAND", &["<program> [args...]"])
            .parse_with_writer(&line, |s| CommandSpec::parse(s).ok().map(Some), None, writer);
        if let Some(spec) = spec {
            config.command.program = spec.program().to_string();
            config.command.args = spec.args().to_vec();
        }
    }

    // WATCH_RERUN_DEBOUNCE_MS
    if let Some(value) = get_env("WATCH_RERUN_DEBOUNCE_MS") {
        config.watch.debounce_ms = EnvVarValidator::new("WATCH_RERUN_DEBOUNCE_MS", &["<milliseconds>"])
            .parse_with_writer(
                &value,
                |s| s.trim().parse::<u64>().ok(),
                config.watch.debounce_ms,
                writer,
            );
    }

    // WATCH_RERUN_CLEAR
    if let Some(value) = get_env("WATCH_RERUN_CLEAR") {
        config.output.clear = EnvVarValidator::new("WATCH_RERUN_CLEAR", &["true", "false"])
            .parse_with_writer(&value, parse_bool, config.output.clear, writer);
    }

    // WATCH_RERUN_COLOR
    if let Some(value) = get_env("WATCH_RERUN_COLOR") {
        config.output.color =
            EnvVarValidator::new("WATCH_RERUN_COLOR", &["auto", "always", "never"])
                .parse_with_writer(&value, ColorMode::parse, config.output.color, writer);
    }

    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// User config file: `WATCH_RERUN_USER_CONFIG_PATH`, then
/// `$XDG_CONFIG_HOME/watch-rerun/config.toml`, then the platform config dir
fn user_config_path(get_env: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(path) = get_env("WATCH_RERUN_USER_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }
    get_env("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("watch-rerun").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "watch",
        "paths",
        "recursive",
        "debounce_ms",
        "ignore_unchanged",
        "run_on_start",
        "command",
        "program",
        "args",
        "kill_grace_ms",
        "output",
        "clear",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
