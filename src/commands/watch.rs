use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use watch_rerun::config::Config;
use watch_rerun::presentation::{factory, Cli};
use watch_rerun::WatchEvent;

use crate::ui::context::UiContext;

/// Run the watch loop until Ctrl-C.
///
/// Returns the process exit code. Errors raised before the loop starts are
/// returned as `Err` for `main` to report with `ui`, which is updated here
/// from the loaded config; a watch failure inside the loop has already
/// been reported as an `error` event and only sets the code.
pub fn cmd_watch(cli: &Cli, ui_out: &mut UiContext) -> Result<i32> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let loaded = Config::discover(&cwd, cli.config.as_deref())?;
    let ui = UiContext::new(cli.json, cli.color, &loaded.config);
    *ui_out = ui;

    if let Some(source) = &loaded.source {
        tracing::debug!(config = %source.display(), "loaded configuration");
    }
    crate::ui::output::print_config_warnings(&loaded.warnings, ui.unicode);

    let settings = factory::resolve_settings(cli, &loaded.config)?;
    let use_case = factory::create_watch_use_case(&settings);
    use_case.validate()?;

    let mut notifier = factory::create_notifier(&settings)?;
    let mut runner = factory::create_runner(&settings);
    let mut screen = factory::create_screen(&settings, ui.json);

    // Set up Ctrl+C handler: drop the flag and wake a blocked wait
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    let interrupt = notifier.interrupt_handle();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
        interrupt.interrupt();
    })
    .context("failed to install Ctrl+C handler")?;

    if !ui.json {
        let watching: Vec<String> = notifier
            .watched()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        print!(
            "{}",
            crate::ui::views::watch::render_watch_header(
                &watching,
                &settings.command.to_string(),
                ui.color,
                ui.unicode
            )
        );
    }

    let reported = Cell::new(false);
    let result = use_case.start(&mut notifier, &mut runner, &mut screen, &running, |event| {
        if matches!(event, WatchEvent::Error { .. }) {
            reported.set(true);
        }

        if ui.json {
            if let Err(err) = crate::ui::json::emit_line(&event.to_json()) {
                tracing::warn!(error = %err, "failed to write event");
            }
            return;
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered =
            crate::ui::views::watch::render_watch_event(&timestamp, &event, ui.color, ui.unicode);

        match event {
            WatchEvent::Error { .. } | WatchEvent::RunFailedToStart { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    });

    match result {
        Ok(summary) => {
            tracing::debug!(cycles = summary.cycles, reason = ?summary.reason, "watch finished");
            Ok(0)
        }
        Err(err) if reported.get() => Ok(err.exit_code()),
        Err(err) => Err(err.into()),
    }
}
