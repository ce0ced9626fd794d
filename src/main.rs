//! watch-rerun CLI - re-run a test command whenever watched files change
//!
//! Usage: watch-rerun [OPTIONS] [PATH]... [-- <COMMAND>...]
//!
//! Exit codes:
//!   0  interrupted with Ctrl+C
//!   1  other error (I/O, unreadable config)
//!   2  configuration error (no paths, empty command)
//!   3  watched path not found
//!   4  watch failed while running

mod commands;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use watch_rerun::presentation::Cli;
use watch_rerun::{Config, RerunError};

use crate::ui::context::UiContext;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Refined by `cmd_watch` once the config file is loaded
    let mut ui_context = UiContext::new(cli.json, cli.color, &Config::default());

    let code = match commands::watch::cmd_watch(&cli, &mut ui_context) {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err, &ui_context);
            err.downcast_ref::<RerunError>()
                .map(RerunError::exit_code)
                .unwrap_or(1)
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Logs go to stderr; `-v` raises our level, `RUST_LOG` overrides it.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,watch_rerun={}", level)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
