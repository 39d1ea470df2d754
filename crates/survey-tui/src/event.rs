use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// The terminal lost focus; treated like the pointer leaving the window.
    FocusLost,
    Tick,
}

fn normalize_event(event: Event) -> AppEvent {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
        Event::Mouse(mouse) => AppEvent::Mouse(mouse),
        Event::Resize(width, height) => AppEvent::Resize { width, height },
        Event::FocusLost => AppEvent::FocusLost,
        _ => AppEvent::Tick,
    }
}

/// Wait up to `timeout` for input. No input is reported as a tick.
pub fn next_event(timeout: Duration) -> Result<AppEvent> {
    if !event::poll(timeout)? {
        return Ok(AppEvent::Tick);
    }

    Ok(normalize_event(event::read()?))
}
