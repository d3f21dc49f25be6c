use std::io::{self, Stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use super::{screens, Display, Screen};
use crate::error::Result;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the raw-mode terminal for the lifetime of a run. The terminal is
/// restored when the shell is dropped or a panic unwinds.
pub struct TerminalShell {
    terminal: Tui,
    color: Color,
}

impl TerminalShell {
    pub fn init(color: Color) -> io::Result<Self> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore();
            original_hook(info);
        }));

        enable_raw_mode()?;
        let terminal = (|| -> io::Result<Tui> {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, Hide)?;
            Terminal::new(CrosstermBackend::new(stdout))
        })();

        match terminal {
            Ok(terminal) => Ok(Self { terminal, color }),
            Err(e) => {
                let _ = restore();
                Err(e)
            }
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn draw_with(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Display for TerminalShell {
    fn draw(&mut self, screen: &Screen) -> Result<()> {
        let color = self.color;
        self.terminal.draw(|f| screens::render(f, screen, color))?;
        Ok(())
    }
}

impl Drop for TerminalShell {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}
