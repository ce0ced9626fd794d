use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use watch_rerun::config::{ColorMode, Config};
use watch_rerun::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, cli_color: Option<ColorWhen>, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, cli_color, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        cli_color: Option<ColorWhen>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        Self {
            json,
            color,
            unicode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            supports_color: true,
            supports_unicode: true,
            is_ci: false,
        }
    }

    fn ci_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_ci: true,
            ..tty_caps()
        }
    }

    #[test]
    fn tty_defaults_to_color() {
        let ui = UiContext::from_caps(false, None, &Config::default(), tty_caps());
        assert!(ui.color);
        assert!(ui.unicode);
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let mut config = Config::default();
        config.output.color = ColorMode::Auto;

        let ui = UiContext::from_caps(false, None, &config, ci_caps());
        assert!(!ui.color);
    }

    #[test]
    fn ci_allows_explicit_color_always_flag() {
        let config = Config::default();
        let ui = UiContext::from_caps(false, Some(ColorWhen::Always), &config, ci_caps());
        assert!(ui.color);
    }

    #[test]
    fn cli_never_beats_config_always() {
        let mut config = Config::default();
        config.output.color = ColorMode::Always;

        let ui = UiContext::from_caps(false, Some(ColorWhen::Never), &config, tty_caps());
        assert!(!ui.color);
    }

    #[test]
    fn config_can_disable_unicode() {
        let mut config = Config::default();
        config.output.unicode = false;

        let ui = UiContext::from_caps(false, None, &config, tty_caps());
        assert!(!ui.unicode);
    }
}
