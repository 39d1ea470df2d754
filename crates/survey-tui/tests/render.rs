use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use survey_core::question::QUESTIONS;
use survey_tui::{App, Settings, ambient::Ambient, ui};

fn screen_text(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in buf.area.top()..buf.area.bottom() {
        for x in buf.area.left()..buf.area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn render(terminal: &mut Terminal<TestBackend>, app: &mut App) -> String {
    terminal
        .draw(|frame| {
            app.set_viewport(frame.area());
            ui::draw(frame, app);
        })
        .unwrap();
    screen_text(terminal.backend().buffer())
}

fn setup() -> (Terminal<TestBackend>, App, Instant) {
    let now = Instant::now();
    let terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    let app = App::with_ambient(Settings::default(), Ambient::seeded(0, 0), now);
    (terminal, app, now)
}

fn press(app: &mut App, c: char, now: Instant) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), now);
}

#[test]
fn first_screen_shows_question_one() {
    let (mut terminal, mut app, _) = setup();
    let text = render(&mut terminal, &mut app);
    assert!(text.contains(QUESTIONS[0].text));
    assert!(text.contains("Human 0"));
    assert!(text.contains("AI 0"));
    assert!(text.contains("1 / 10"));
    assert!(text.contains("Submit"));
    assert!(text.contains("Keybindings: ?"));
}

#[test]
fn answering_slides_to_next_question() {
    let (mut terminal, mut app, t0) = setup();
    render(&mut terminal, &mut app);
    press(&mut app, 'h', t0);
    app.update(t0 + Duration::from_millis(300));
    app.update(t0 + Duration::from_millis(1200));
    let text = render(&mut terminal, &mut app);
    assert!(text.contains(QUESTIONS[1].text));
    assert!(!text.contains(QUESTIONS[0].text));
    assert!(text.contains("Human 1"));
    assert!(text.contains("2 / 10"));
}

#[test]
fn results_view_after_submit() {
    let (mut terminal, mut app, t0) = setup();
    render(&mut terminal, &mut app);
    press(&mut app, 'a', t0);
    app.update(t0 + Duration::from_millis(300));
    press(&mut app, 'h', t0 + Duration::from_millis(300));
    press(&mut app, 's', t0 + Duration::from_millis(310));
    app.update(t0 + Duration::from_millis(320));
    app.update(t0 + Duration::from_secs(2));
    let text = render(&mut terminal, &mut app);
    assert!(text.contains("Results"));
    assert!(text.contains("Human 1  vs  AI 1"));
    assert!(text.contains("50%  of 2 answered  50%"));
    assert!(text.contains("Restart"));
    assert!(!text.contains("Submit"));
}

#[test]
fn help_popup_lists_bindings() {
    let (mut terminal, mut app, t0) = setup();
    press(&mut app, '?', t0);
    let text = render(&mut terminal, &mut app);
    assert!(text.contains("Keybindings"));
    assert!(text.contains("Previous / next question"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let now = Instant::now();
    let mut terminal = Terminal::new(TestBackend::new(12, 5)).unwrap();
    let mut app = App::with_ambient(Settings::default(), Ambient::seeded(8, 1), now);
    render(&mut terminal, &mut app);
    app.update(now + Duration::from_millis(16));
    render(&mut terminal, &mut app);
}
