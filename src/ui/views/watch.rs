use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use watch_rerun::WatchEvent;

pub fn render_watch_header(
    watching: &[String],
    command: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "watch-rerun");
    header.add("Watching", watching.join(", "));
    header.add("Command", command);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);

    match event {
        WatchEvent::WatchStarted { watching, .. } => format!(
            "{} {} Watching: {}\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            watching.join(", ")
        ),
        WatchEvent::FileChanged { path } => format!(
            "{} {} Changed: {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path
        ),
        WatchEvent::RunStarted { cycle, command } => format!(
            "{} {} Run #{}: {}\n",
            prefix,
            Icon::Progress.colored(supports_color, supports_unicode),
            cycle,
            command
        ),
        WatchEvent::RunFinished {
            exit_code,
            success,
            duration_ms,
            interrupted,
            ..
        } => {
            let took = format_duration(*duration_ms);
            if *interrupted {
                format!(
                    "{} {} Interrupted after {}\n",
                    prefix,
                    Icon::Warning.colored(supports_color, supports_unicode),
                    took
                )
            } else if *success {
                format!(
                    "{} {} {} in {}\n",
                    prefix,
                    Icon::Success.colored(supports_color, supports_unicode),
                    ColoredText::success("Passed").render(supports_color),
                    took
                )
            } else {
                let status = match exit_code {
                    Some(code) => format!("Failed (exit {})", code),
                    None => "Killed by signal".to_string(),
                };
                format!(
                    "{} {} {} in {}\n",
                    prefix,
                    Icon::Error.colored(supports_color, supports_unicode),
                    ColoredText::error(status).render(supports_color),
                    took
                )
            }
        }
        WatchEvent::RunFailedToStart { message, .. } => format!(
            "{} {} {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(message.as_str()).render(supports_color)
        ),
        WatchEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            message
        ),
        WatchEvent::Shutdown { cycles } => format!(
            "\n{} {} Watch stopped after {} run{}.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            cycles,
            if *cycles == 1 { "" } else { "s" }
        ),
    }
}

fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_with_paths_and_command() {
        let rendered = render_watch_header(
            &["src".to_string(), "tests".to_string()],
            "pytest -q",
            false,
            false,
        );
        assert!(rendered.contains("[~] watch-rerun"));
        assert!(rendered.contains("Watching: src, tests"));
        assert!(rendered.contains("Command: pytest -q"));
    }

    #[test]
    fn renders_started_event_with_watch_icon() {
        let event = WatchEvent::WatchStarted {
            watching: vec!["tests".to_string()],
            command: "pytest".to_string(),
        };
        let rendered = render_watch_event("00:00:00", &event, false, false);
        assert_eq!(rendered, "[00:00:00] [~] Watching: tests\n");
    }

    #[test]
    fn renders_passed_run() {
        let event = WatchEvent::RunFinished {
            cycle: 1,
            exit_code: Some(0),
            success: true,
            duration_ms: 1250,
            interrupted: false,
        };
        let rendered = render_watch_event("12:00:00", &event, false, false);
        assert!(rendered.contains("[OK] Passed in 1.25s"));
    }

    #[test]
    fn renders_failed_run_with_exit_code() {
        let event = WatchEvent::RunFinished {
            cycle: 2,
            exit_code: Some(1),
            success: false,
            duration_ms: 40,
            interrupted: false,
        };
        let rendered = render_watch_event("12:00:00", &event, false, true);
        assert!(rendered.contains("✗ Failed (exit 1) in 40ms"));
    }

    #[test]
    fn renders_interrupted_run() {
        let event = WatchEvent::RunFinished {
            cycle: 2,
            exit_code: None,
            success: false,
            duration_ms: 10,
            interrupted: true,
        };
        let rendered = render_watch_event("12:00:00", &event, false, false);
        assert!(rendered.contains("[WARN] Interrupted after 10ms"));
    }

    #[test]
    fn renders_shutdown_plural() {
        let one = render_watch_event("t", &WatchEvent::Shutdown { cycles: 1 }, false, false);
        let many = render_watch_event("t", &WatchEvent::Shutdown { cycles: 3 }, false, false);
        assert!(one.contains("after 1 run."));
        assert!(many.contains("after 3 runs."));
    }
}
