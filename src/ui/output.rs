use watch_rerun::config::ConfigWarning;

pub fn format_config_warning(w: &ConfigWarning, supports_unicode: bool) -> String {
    let icon = crate::ui::primitives::icon::Icon::Warning.render(supports_unicode);
    let mut out = match w.line {
        Some(line) => format!(
            "{} Unknown config key '{}' in {}:{}\n",
            icon,
            w.key,
            w.file.display(),
            line
        ),
        None => format!(
            "{} Unknown config key '{}' in {}\n",
            icon,
            w.key,
            w.file.display()
        ),
    };

    if let Some(suggestion) = &w.suggestion {
        out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
    }
    out
}

pub fn print_config_warnings(warnings: &[ConfigWarning], supports_unicode: bool) {
    for w in warnings {
        eprint!("{}", format_config_warning(w, supports_unicode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn warning_includes_line_and_suggestion() {
        let w = ConfigWarning {
            key: "debounce_mss".to_string(),
            file: PathBuf::from(".watch-rerun.toml"),
            line: Some(3),
            suggestion: Some("debounce_ms".to_string()),
        };
        let rendered = format_config_warning(&w, false);
        assert!(rendered.contains("[WARN] Unknown config key 'debounce_mss' in .watch-rerun.toml:3"));
        assert!(rendered.contains("Did you mean 'debounce_ms'?"));
    }

    #[test]
    fn warning_without_line() {
        let w = ConfigWarning {
            key: "colour".to_string(),
            file: PathBuf::from("config.toml"),
            line: None,
            suggestion: None,
        };
        let rendered = format_config_warning(&w, true);
        assert_eq!(rendered, "⚠ Unknown config key 'colour' in config.toml\n");
    }
}
