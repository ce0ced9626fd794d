//! Terminal clearing

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use is_terminal::IsTerminal;

use crate::domain::ports::Screen;

/// Clears stdout when it is a terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalScreen {
    enabled: bool,
}

impl TerminalScreen {
    /// A screen that clears stdout, if `enabled` and stdout is a TTY.
    ///
    /// Piped output is never sent escape sequences.
    pub fn stdout(enabled: bool) -> Self {
        Self {
            enabled: enabled && io::stdout().is_terminal(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        out.flush()?;
        // Scrollback purge is not supported everywhere
        let _ = execute!(out, Clear(ClearType::Purge));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_screen_is_a_no_op() {
        let mut screen = TerminalScreen::stdout(false);
        assert!(!screen.is_enabled());
        assert!(screen.clear().is_ok());
    }
}
