//! End-to-end survey scenarios: configuration into the app, then scripted
//! key presses and clock ticks.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use survey::config::SurveyConfig;
use survey_core::{Answer, Scores};
use survey_tui::{App, Screen, ambient::Ambient};

fn app_with(toml: &str) -> (App, Instant) {
    let settings = SurveyConfig::parse(toml).unwrap().to_settings();
    let now = Instant::now();
    (App::with_ambient(settings, Ambient::seeded(0, 0), now), now)
}

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    app.update(now);
}

#[test]
fn ten_humans_fill_the_left_column() {
    let (mut app, mut now) = app_with("");
    for _ in 0..10 {
        press(&mut app, KeyCode::Char('h'), now);
        now += Duration::from_millis(300);
        app.update(now);
    }
    assert!(app.controller.is_result());
    assert_eq!(app.controller.scores(), Scores { human: 10, ai: 0 });
    assert_eq!(app.slide.to, Screen::Results);

    for _ in 0..300 {
        now += Duration::from_millis(16);
        app.update(now);
    }
    let levels = app.hero.levels();
    assert!((levels.human - 100.0).abs() < 0.5);
    assert!(levels.ai.abs() < 0.5);
}

#[test]
fn answer_then_restart_returns_to_start() {
    let (mut app, t0) = app_with("");
    press(&mut app, KeyCode::Char('h'), t0);
    app.update(t0 + Duration::from_millis(300));
    press(&mut app, KeyCode::Char('a'), t0 + Duration::from_millis(310));
    press(&mut app, KeyCode::Char('r'), t0 + Duration::from_millis(320));

    let state = app.controller.state();
    assert_eq!(state.current_step(), 0);
    assert!(state.answers().iter().all(|a| *a == Answer::Unanswered));

    // The advance scheduled by the second answer was dropped with the restart.
    app.update(t0 + Duration::from_secs(2));
    assert_eq!(app.controller.state().current_step(), 0);
}

#[test]
fn early_submit_scales_fill_to_answered() {
    let (mut app, mut now) = app_with("[survey]\nadvance_delay_ms = 50\n");
    for key in ['h', 'a', 'h'] {
        press(&mut app, KeyCode::Char(key), now);
        now += Duration::from_millis(50);
        app.update(now);
    }
    press(&mut app, KeyCode::Char('s'), now);
    let snapshot = app.controller.snapshot();
    assert!(snapshot.is_result);
    assert_eq!(snapshot.fill_total(), 3);
    assert!(snapshot.scores.answered() <= 3);

    for _ in 0..400 {
        now += Duration::from_millis(16);
        app.update(now);
    }
    let levels = app.hero.levels();
    assert!((levels.human - 200.0 / 3.0).abs() < 0.5);
    assert!((levels.ai - 100.0 / 3.0).abs() < 0.5);
}

#[test]
fn arrows_move_without_answering() {
    let (mut app, t0) = app_with("");
    press(&mut app, KeyCode::Left, t0);
    assert_eq!(app.controller.state().current_step(), 0);
    press(&mut app, KeyCode::Right, t0);
    press(&mut app, KeyCode::Right, t0);
    assert_eq!(app.controller.state().current_step(), 2);
    press(&mut app, KeyCode::Left, t0);
    assert_eq!(app.controller.state().current_step(), 1);
    assert_eq!(app.controller.scores(), Scores::default());
}
