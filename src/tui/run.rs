//! Board TUI entry point and terminal setup.

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::warn;

use crate::reassign::StatusChange;
use crate::source::TaskSource;
use crate::tui::board::BoardApp;
use crate::tui::theme::Theme;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
/// Dropping it puts the terminal back, also when the board errors or panics.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            disable_raw_mode().ok();
            return Err(e);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(TerminalSession { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let restored = disable_raw_mode()
            .and_then(|()| execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture))
            .and_then(|()| self.terminal.show_cursor());
        if let Err(e) = restored {
            warn!(error = %e, "could not restore terminal");
        }
    }
}

/// Run the board for `task_id` until the user quits.
/// Returns the status changes made during the session.
pub fn run_board_tui(source: Arc<dyn TaskSource>, task_id: &str, theme: Theme) -> io::Result<Vec<StatusChange>> {
    let mut session = TerminalSession::enter()?;
    let mut app = BoardApp::new(source, task_id, theme);
    app.run(&mut session.terminal)?;
    drop(session);
    Ok(app.into_changes())
}
