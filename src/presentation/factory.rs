//! Use Case Factory
//!
//! Merges CLI flags over the loaded configuration and creates the use case
//! with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::PathBuf;
use std::time::Duration;

use crate::application::{WatchOptions, WatchUseCase};
use crate::config::Config;
use crate::domain::value_objects::CommandSpec;
use crate::error::RerunResult;
use crate::infrastructure::{NotifierOptions, NotifyWatcher, ProcessRunner, TerminalScreen};

use super::cli::Cli;

/// Effective settings for one session: CLI flags over configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub targets: Vec<PathBuf>,
    pub command: CommandSpec,
    pub clear: bool,
    pub run_on_start: bool,
    pub notifier: NotifierOptions,
    pub kill_grace: Duration,
}

/// Resolve the effective settings.
///
/// Paths and command given on the command line replace the configured
/// ones; boolean flags can only switch a behavior on (or, for
/// `--no-clear`, off).
pub fn resolve_settings(cli: &Cli, config: &Config) -> RerunResult<Settings> {
    let targets = if cli.paths.is_empty() {
        config.watch.paths.clone()
    } else {
        cli.paths.clone()
    };

    let command = if cli.command.is_empty() {
        config.command_spec()?
    } else {
        CommandSpec::from_argv(cli.command.iter().cloned())?
    };

    let debounce_ms = cli.debounce.unwrap_or(config.watch.debounce_ms);

    Ok(Settings {
        targets,
        command,
        clear: config.output.clear && !cli.no_clear,
        run_on_start: cli.run_on_start || config.watch.run_on_start,
        notifier: NotifierOptions {
            recursive: config.watch.recursive,
            debounce: Duration::from_millis(debounce_ms),
            ignore_unchanged: cli.ignore_unchanged || config.watch.ignore_unchanged,
        },
        kill_grace: Duration::from_millis(config.command.kill_grace_ms),
    })
}

/// Create a watch use case for the given settings
pub fn create_watch_use_case(settings: &Settings) -> WatchUseCase {
    let options = WatchOptions::new(settings.targets.clone(), settings.command.clone())
        .with_clear(settings.clear)
        .with_run_on_start(settings.run_on_start);
    WatchUseCase::new(options)
}

/// Start the filesystem watch for the given settings
pub fn create_notifier(settings: &Settings) -> RerunResult<NotifyWatcher> {
    NotifyWatcher::new(&settings.targets, settings.notifier)
}

/// Create the child process runner
pub fn create_runner(settings: &Settings) -> ProcessRunner {
    ProcessRunner::new(settings.kill_grace)
}

/// Create the screen; clearing is skipped when stdout carries NDJSON
pub fn create_screen(settings: &Settings, json: bool) -> TerminalScreen {
    TerminalScreen::stdout(settings.clear && !json)
}
