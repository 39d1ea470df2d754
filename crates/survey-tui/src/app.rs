use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Position, layout::Rect};
use survey_core::animation::{Pulse, Slide};
use survey_core::hero::FillLevels;
use survey_core::keys::KeyInput;
use survey_core::question::QUESTIONS;
use survey_core::state::{Choice, Scores};
use survey_core::{NavDirection, SurveyController};
use tracing::{debug, info};

use crate::ambient::Ambient;
use crate::event::{self, AppEvent};
use crate::hero::HeroView;
use crate::results::ResultsCommand;
use crate::settings::Settings;
use crate::ui::{self, ScreenLayout};

/// What occupies the controls area. Questions are keyed by id so the slide
/// follows identity rather than position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Question(u32),
    Results,
}

/// Every clickable thing on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Choice(Choice),
    Reset,
    Prev,
    Next,
    Submit,
    Step(usize),
    Restart,
}

/// How the session ended, reported after the terminal is restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub scores: Scores,
    pub completed: bool,
    pub step: usize,
}

pub struct App {
    pub controller: SurveyController,
    pub settings: Settings,
    pub hero: HeroView,
    pub ambient: Ambient,
    pub slide: Slide<Screen>,
    pub layout: ScreenLayout,
    /// When the results view appeared, for its fade-in.
    pub results_since: Option<Instant>,
    pub hover: Option<Control>,
    pub pressed: Option<Control>,
    pub show_help: bool,
    pub should_quit: bool,
    started: Instant,
    last_update: Instant,
}

impl App {
    pub fn new(settings: Settings, now: Instant) -> Self {
        let ambient = Ambient::new(settings.particles);
        Self::with_ambient(settings, ambient, now)
    }

    /// Build with a given particle field; tests pass a seeded one.
    pub fn with_ambient(settings: Settings, ambient: Ambient, now: Instant) -> Self {
        let controller = SurveyController::new(&QUESTIONS, settings.advance_delay);
        let first = screen_for(&controller);
        Self {
            hero: HeroView::new(settings.fill_spring, settings.tilt_spring, settings.max_tilt_deg),
            controller,
            ambient,
            slide: Slide::settled(first, now),
            layout: ScreenLayout::default(),
            results_since: None,
            hover: None,
            pressed: None,
            show_help: false,
            should_quit: false,
            started: now,
            last_update: now,
            settings,
        }
    }

    /// Time of the last update; everything on screen is drawn as of then.
    pub const fn now(&self) -> Instant {
        self.last_update
    }

    /// Keyword highlight intensity for the current frame.
    pub fn pulse(&self) -> f64 {
        let pulse = Pulse {
            period: self.settings.pulse_period,
            ..Pulse::KEYWORD
        };
        pulse.value(self.last_update.saturating_duration_since(self.started))
    }

    pub fn set_viewport(&mut self, area: Rect) {
        let layout = ScreenLayout::compute(area, self.controller.question_count());
        if layout != self.layout {
            debug!(width = area.width, height = area.height, "layout recomputed");
            self.layout = layout;
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<SessionSummary> {
        info!(questions = self.controller.question_count(), "survey started");
        self.update(Instant::now());

        loop {
            terminal.draw(|frame| {
                self.set_viewport(frame.area());
                ui::draw(frame, self);
            })?;

            let timeout = self.poll_timeout(Instant::now());
            let event = event::next_event(timeout)?;
            let now = Instant::now();
            self.handle_event(event, now);
            self.update(now);

            if self.should_quit {
                break;
            }
        }

        Ok(self.finish())
    }

    /// Frame interval, shortened so a due auto-advance is not late.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let frame = self.settings.frame_interval;
        self.controller
            .next_deadline()
            .map_or(frame, |due| frame.min(due.saturating_duration_since(now)))
    }

    /// Tear down: drop any pending advance and report the outcome.
    pub fn finish(&mut self) -> SessionSummary {
        self.controller.deactivate();
        let summary = SessionSummary {
            scores: self.controller.scores(),
            completed: self.controller.is_result(),
            step: self.controller.state().current_step(),
        };
        info!(
            human = summary.scores.human,
            ai = summary.scores.ai,
            completed = summary.completed,
            "survey closed"
        );
        summary
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Mouse(mouse) if self.settings.mouse => self.handle_mouse(mouse, now),
            AppEvent::FocusLost => {
                self.hero.pointer_left();
                self.hover = None;
                self.pressed = None;
            }
            AppEvent::Mouse(_) | AppEvent::Resize { .. } | AppEvent::Tick => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return;
        }

        if self.controller.is_result() {
            if matches!(key.code, KeyCode::Char('r') | KeyCode::Enter) {
                self.results_command(ResultsCommand::Restart);
            }
            return;
        }

        let input = match key.code {
            KeyCode::Char('r') => {
                self.controller.restart();
                return;
            }
            KeyCode::Char('s') | KeyCode::Enter => {
                self.controller.submit();
                return;
            }
            KeyCode::Left => KeyInput::Left,
            KeyCode::Right => KeyInput::Right,
            KeyCode::Char(c) => KeyInput::Char(c),
            _ => return,
        };
        self.controller.handle_key(input, now);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        self.hero.pointer_at(self.layout.hero, column, row);
        let target = self.control_at(column, row, now);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                self.hover = target;
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.hover = target;
                self.pressed = target;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.hover = target;
                // A click lands only if released over the control it started on.
                if let Some(pressed) = self.pressed.take()
                    && target == Some(pressed)
                {
                    self.activate(pressed, now);
                }
            }
            _ => {}
        }
    }

    /// The enabled control under a cell, if any.
    ///
    /// Answer buttons only register once the question panel has settled;
    /// mid-slide their cells belong to whichever panel is passing through.
    pub fn control_at(&self, column: u16, row: u16, now: Instant) -> Option<Control> {
        if self.show_help {
            return None;
        }
        let at = Position::new(column, row);
        let layout = &self.layout;

        if self.controller.is_result() {
            return layout.restart.contains(at).then_some(Control::Restart);
        }

        let candidates = [
            (layout.buttons.human, Control::Choice(Choice::Human)),
            (layout.buttons.ai, Control::Choice(Choice::Ai)),
            (layout.reset, Control::Reset),
            (layout.prev, Control::Prev),
            (layout.next, Control::Next),
            (layout.submit, Control::Submit),
        ];
        if let Some(&(_, control)) = candidates.iter().find(|(area, _)| area.contains(at)) {
            if matches!(control, Control::Choice(_)) && !self.slide.is_done(now) {
                return None;
            }
            return self.is_enabled(control).then_some(control);
        }
        layout
            .dot_at(column, row, self.controller.question_count())
            .map(Control::Step)
    }

    fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Prev => self.controller.can_go_back(),
            Control::Next => self.controller.can_go_next(),
            Control::Restart => self.controller.is_result(),
            _ => !self.controller.is_result(),
        }
    }

    pub fn activate(&mut self, control: Control, now: Instant) {
        if !self.is_enabled(control) {
            return;
        }
        debug!(?control, "activated");
        match control {
            Control::Choice(choice) => {
                self.controller.answer(choice, now);
            }
            Control::Reset => self.controller.restart(),
            Control::Prev => self.controller.navigate(NavDirection::Prev),
            Control::Next => self.controller.navigate(NavDirection::Next),
            Control::Submit => self.controller.submit(),
            Control::Step(index) => self.controller.jump_to(index),
            Control::Restart => self.results_command(ResultsCommand::Restart),
        }
    }

    pub fn results_command(&mut self, command: ResultsCommand) {
        match command {
            ResultsCommand::Restart => self.controller.restart(),
        }
    }

    /// Advance time to `now`: fire a due auto-advance, follow the survey
    /// with the slide and fill targets, and step every animation.
    pub fn update(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_update).as_secs_f64();
        self.last_update = now;

        self.controller.poll(now);

        let screen = screen_for(&self.controller);
        let direction = self.controller.state().direction();
        if self
            .slide
            .retarget(screen, direction, self.settings.slide_duration, now)
        {
            debug!(?screen, ?direction, "slide started");
            self.hover = None;
            self.pressed = None;
        }
        match (screen, self.results_since) {
            (Screen::Results, None) => self.results_since = Some(now),
            (Screen::Question(_), Some(_)) => self.results_since = None,
            _ => {}
        }

        let snapshot = self.controller.snapshot();
        self.hero
            .set_levels(FillLevels::from_scores(snapshot.scores, snapshot.fill_total()));
        self.hero.step(dt);
        self.ambient.step(dt);
    }
}

fn screen_for(controller: &SurveyController) -> Screen {
    controller
        .current_question()
        .map_or(Screen::Results, |q| Screen::Question(q.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::state::{Answer, Direction};

    fn app() -> (App, Instant) {
        let now = Instant::now();
        let mut app = App::with_ambient(Settings::default(), Ambient::seeded(0, 0), now);
        app.set_viewport(Rect::new(0, 0, 100, 40));
        (app, now)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, at: (u16, u16)) -> MouseEvent {
        MouseEvent {
            kind,
            column: at.0,
            row: at.1,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn center(area: Rect) -> (u16, u16) {
        (area.x + area.width / 2, area.y + area.height / 2)
    }

    fn click(app: &mut App, at: (u16, u16), now: Instant) {
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), at), now);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), at), now);
    }

    #[test]
    fn key_answer_advances_after_delay() {
        let (mut app, t0) = app();
        app.handle_key(key(KeyCode::Char('h')), t0);
        app.update(t0 + Duration::from_millis(100));
        assert_eq!(app.controller.state().current_step(), 0);
        app.update(t0 + Duration::from_millis(300));
        assert_eq!(app.controller.state().current_step(), 1);
        assert_eq!(app.slide.to, Screen::Question(2));
        assert_eq!(app.slide.direction, Direction::Forward);
    }

    #[test]
    fn click_answers_exactly_once() {
        let (mut app, t0) = app();
        let human = center(app.layout.buttons.human);
        click(&mut app, human, t0);
        assert_eq!(app.controller.state().answers()[0], Answer::Human);
        assert_eq!(app.controller.scores(), Scores { human: 1, ai: 0 });
        app.update(t0 + Duration::from_millis(300));
        assert_eq!(app.controller.state().current_step(), 1);
    }

    #[test]
    fn choice_clicks_wait_for_the_slide_to_settle() {
        let (mut app, t0) = app();
        let human = center(app.layout.buttons.human);
        click(&mut app, human, t0);
        let slide_start = t0 + Duration::from_millis(300);
        app.update(slide_start);
        assert_eq!(app.controller.state().current_step(), 1);

        let mid_slide = slide_start + Duration::from_millis(50);
        app.update(mid_slide);
        assert_eq!(app.control_at(human.0, human.1, mid_slide), None);
        click(&mut app, human, mid_slide);
        assert_eq!(app.controller.state().answers()[1], Answer::Unanswered);
        assert_eq!(app.controller.scores(), Scores { human: 1, ai: 0 });

        let settled = slide_start + app.settings.slide_duration;
        app.update(settled);
        click(&mut app, human, settled);
        assert_eq!(app.controller.state().answers()[1], Answer::Human);
    }

    #[test]
    fn release_elsewhere_cancels_click() {
        let (mut app, t0) = app();
        let human = center(app.layout.buttons.human);
        let ai = center(app.layout.buttons.ai);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), human), t0);
        assert_eq!(app.pressed, Some(Control::Choice(Choice::Human)));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), ai), t0);
        assert_eq!(app.controller.state().answers()[0], Answer::Unanswered);
        assert_eq!(app.pressed, None);
    }

    #[test]
    fn prev_is_not_clickable_on_first_question() {
        let (app, t0) = app();
        let (x, y) = center(app.layout.prev);
        assert_eq!(app.control_at(x, y, t0), None);
    }

    #[test]
    fn dot_click_jumps() {
        let (mut app, t0) = app();
        let row = app.layout.dots.y + 1;
        let x = app.layout.dots.x + 1 + 2 * 4;
        click(&mut app, (x, row), t0);
        assert_eq!(app.controller.state().current_step(), 4);
        app.update(t0);
        assert_eq!(app.slide.direction, Direction::Forward);
        let x = app.layout.dots.x + 1 + 2;
        click(&mut app, (x, row), t0);
        assert_eq!(app.controller.state().current_step(), 1);
        assert_eq!(app.controller.state().direction(), Direction::Backward);
    }

    #[test]
    fn current_dot_click_keeps_pending_advance() {
        let (mut app, t0) = app();
        app.handle_key(key(KeyCode::Char('h')), t0);
        let current = (app.layout.dots.x + 1, app.layout.dots.y + 1);
        click(&mut app, current, t0 + Duration::from_millis(100));
        assert!(app.controller.advance_pending());
        app.update(t0 + Duration::from_millis(300));
        assert_eq!(app.controller.state().current_step(), 1);
        assert_eq!(app.slide.direction, Direction::Forward);
    }

    #[test]
    fn submit_then_restart_from_results() {
        let (mut app, t0) = app();
        app.handle_key(key(KeyCode::Char('a')), t0);
        app.handle_key(key(KeyCode::Char('s')), t0);
        app.update(t0 + Duration::from_millis(10));
        assert!(app.controller.is_result());
        assert_eq!(app.results_since, Some(t0 + Duration::from_millis(10)));
        // The advance scheduled before submitting never fires.
        app.update(t0 + Duration::from_millis(400));
        assert!(app.controller.is_result());

        // Survey keys are inert on the results view.
        app.handle_key(key(KeyCode::Char('h')), t0);
        assert_eq!(app.controller.scores(), Scores { human: 0, ai: 1 });

        app.handle_key(key(KeyCode::Enter), t0);
        app.update(t0 + Duration::from_millis(500));
        assert!(!app.controller.is_result());
        assert_eq!(app.controller.scores(), Scores::default());
        assert_eq!(app.results_since, None);
    }

    #[test]
    fn restart_button_is_clickable_on_results() {
        let (mut app, t0) = app();
        app.handle_key(key(KeyCode::Enter), t0);
        app.update(t0);
        let restart = center(app.layout.restart);
        assert_eq!(app.control_at(restart.0, restart.1, t0), Some(Control::Restart));
        click(&mut app, restart, t0);
        assert_eq!(app.controller.state().current_step(), 0);
    }

    #[test]
    fn help_swallows_next_key() {
        let (mut app, t0) = app();
        app.handle_key(key(KeyCode::Char('?')), t0);
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Char('h')), t0);
        assert!(!app.show_help);
        assert_eq!(app.controller.scores(), Scores::default());
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let (mut app, t0) = app();
            app.handle_key(key(code), t0);
            assert!(app.should_quit);
        }
        let (mut app, t0) = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), t0);
        assert!(app.should_quit);
    }

    #[test]
    fn control_modified_letters_are_ignored() {
        let (mut app, t0) = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL), t0);
        assert_eq!(app.controller.scores(), Scores::default());
    }

    #[test]
    fn mouse_ignored_when_disabled() {
        let now = Instant::now();
        let settings = Settings {
            mouse: false,
            ..Settings::default()
        };
        let mut app = App::with_ambient(settings, Ambient::seeded(0, 0), now);
        app.set_viewport(Rect::new(0, 0, 100, 40));
        let human = center(app.layout.buttons.human);
        app.handle_event(AppEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), human)), now);
        app.handle_event(AppEvent::Mouse(mouse(MouseEventKind::Up(MouseButton::Left), human)), now);
        assert_eq!(app.controller.scores(), Scores::default());
    }

    #[test]
    fn focus_lost_clears_pointer() {
        let (mut app, t0) = app();
        let hero = center(app.layout.hero);
        app.handle_mouse(mouse(MouseEventKind::Moved, hero), t0);
        assert!(app.hero.pointer_inside());
        app.handle_event(AppEvent::FocusLost, t0);
        assert!(!app.hero.pointer_inside());
    }

    #[test]
    fn fill_targets_follow_scores() {
        let (mut app, t0) = app();
        app.handle_key(key(KeyCode::Char('h')), t0);
        app.update(t0 + Duration::from_millis(16));
        let targets = app.hero.targets();
        assert!((targets.human - 10.0).abs() < 1e-9);
        assert!(targets.ai.abs() < 1e-9);
    }

    #[test]
    fn poll_timeout_shrinks_before_deadline() {
        let (mut app, t0) = app();
        assert_eq!(app.poll_timeout(t0), app.settings.frame_interval);
        app.handle_key(key(KeyCode::Char('h')), t0);
        assert_eq!(app.poll_timeout(t0 + Duration::from_millis(295)), Duration::from_millis(5));
    }

    #[test]
    fn finish_cancels_pending_advance() {
        let (mut app, t0) = app();
        app.handle_key(key(KeyCode::Char('1')), t0);
        let summary = app.finish();
        assert!(!app.controller.advance_pending());
        assert_eq!(summary.scores, Scores { human: 1, ai: 0 });
        assert!(!summary.completed);
        app.update(t0 + Duration::from_secs(1));
        assert_eq!(app.controller.state().current_step(), 0);
    }
}
