use std::path::PathBuf;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone)]
pub struct ErrorBlock {
    message: String,
    path: Option<PathBuf>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            fix: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = format!(
            "{} {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error("ERROR").bold().render(supports_color)
        );
        if let Some(path) = &self.path {
            out.push_str(&format!("  {}\n", path.display()));
        }
        for line in self.message.lines() {
            out.push_str(&format!("  {}\n", line));
        }
        if let Some(fix) = &self.fix {
            out.push('\n');
            for (idx, line) in fix.lines().enumerate() {
                if idx == 0 {
                    out.push_str(&format!("  FIX: {}\n", line));
                } else {
                    out.push_str(&format!("  {}\n", line));
                }
            }
        }
        out
    }
}
