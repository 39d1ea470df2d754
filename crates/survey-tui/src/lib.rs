//! survey-tui: terminal front end for the Human vs AI survey.

pub mod ambient;
pub mod app;
pub mod event;
pub mod hero;
pub mod question;
pub mod results;
pub mod settings;
pub mod theme;
pub mod ui;

pub use app::{App, Control, Screen, SessionSummary};
pub use settings::Settings;

use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};

/// Put the terminal back the way we found it.
///
/// Errors are ignored so this can run from the panic hook.
fn restore_terminal(mouse: bool) {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
    if mouse {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
}

/// Run the survey until the user quits.
pub fn run(settings: Settings) -> Result<SessionSummary> {
    let mouse = settings.mouse;
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal(mouse);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, Instant::now());
    let result = app.run(&mut terminal);

    restore_terminal(mouse);
    terminal.show_cursor()?;

    result
}
