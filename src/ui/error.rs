use watch_rerun::RerunError;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::context::UiContext;

pub fn format_rerun_error(err: &RerunError, supports_color: bool, supports_unicode: bool) -> String {
    let block = ErrorBlock::new(err.to_string());
    let block = match err {
        RerunError::Configuration { .. } => block.with_fix(
            "Pass paths and a command, e.g.\n  watch-rerun src tests -- pytest -q\nor set them in .watch-rerun.toml",
        ),
        RerunError::NotFound { path } => block
            .with_path(path)
            .with_fix("Check the path exists relative to the current directory."),
        RerunError::Watch { path: Some(path), .. } => block
            .with_path(path)
            .with_fix("Restart watch-rerun once the path is back in place."),
        RerunError::ConfigFile { file, .. } => block
            .with_path(file)
            .with_fix("Fix the TOML syntax and try again."),
        RerunError::Watch { path: None, .. } | RerunError::Io(_) => block,
    };
    block.render(supports_color, supports_unicode)
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    if let Some(rerun) = err.downcast_ref::<RerunError>() {
        return format_rerun_error(rerun, supports_color, supports_unicode);
    }

    format!("[ERROR] {:#}\n", err)
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.json {
        let output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    eprint!("{}", format_error(err, ui.color, ui.unicode));
}
