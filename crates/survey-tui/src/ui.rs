use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use survey_core::animation::tween;
use survey_core::question::Question;
use survey_core::state::{Answer, Choice};
use survey_core::SurveySnapshot;

use crate::app::{App, Control, Screen};
use crate::question::{ButtonState, PanelLayout, QuestionPanel, render_button, render_shifted};
use crate::results::{ResultsLayout, ResultsPanel};
use crate::theme;

/// Height of the controls section under the hero.
const CONTROLS_HEIGHT: u16 = 11;
const RESULTS_FADE_MS: u64 = 400;

/// Screen regions, shared by drawing and mouse hit testing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub hero: Rect,
    pub panel: Rect,
    pub buttons: PanelLayout,
    pub reset: Rect,
    pub prev: Rect,
    pub dots: Rect,
    pub next: Rect,
    pub submit: Rect,
    pub results: Rect,
    pub restart: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    #[allow(clippy::cast_possible_truncation)]
    pub fn compute(area: Rect, question_count: usize) -> Self {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(CONTROLS_HEIGHT)])
            .split(outer[0]);
        let controls = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(6), // question panel
                Constraint::Length(1),
                Constraint::Length(3), // nav bar
            ])
            .split(main[1]);

        let dots_width = (question_count * 2).min(usize::from(u16::MAX)) as u16 + 1;
        let nav = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(9),
                Constraint::Min(0),
                Constraint::Length(5),
                Constraint::Length(dots_width),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(10),
            ])
            .split(controls[3]);

        let results_area = Rect {
            y: main[1].y.saturating_add(1),
            height: main[1].height.saturating_sub(1),
            ..main[1]
        };

        Self {
            hero: main[0],
            panel: controls[1],
            buttons: PanelLayout::compute(controls[1]),
            reset: nav[0],
            prev: nav[2],
            dots: nav[3],
            next: nav[4],
            submit: nav[6],
            results: results_area,
            restart: ResultsLayout::compute(results_area).restart,
            status: outer[1],
        }
    }

    /// Question index under a column of the progress dots.
    pub fn dot_at(&self, column: u16, row: u16, question_count: usize) -> Option<usize> {
        if !self.dots.contains(Position::new(column, row)) {
            return None;
        }
        let offset = column.checked_sub(self.dots.x + 1)?;
        let index = usize::from(offset / 2);
        (offset % 2 == 0 && index < question_count).then_some(index)
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let layout = app.layout.clone();
    let snapshot = app.controller.snapshot();
    let buf = frame.buffer_mut();

    app.hero
        .render(layout.hero, buf, &app.ambient, (snapshot.human_score(), snapshot.ai_score()));

    if snapshot.is_result {
        draw_results(buf, app, &layout, &snapshot);
    } else {
        draw_question(buf, app, &layout, &snapshot);
        draw_nav(buf, app, &layout, &snapshot);
    }

    draw_status_bar(frame, app, layout.status);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn button_state(app: &App, control: Control, disabled: bool) -> ButtonState {
    ButtonState {
        hovered: app.hover == Some(control),
        pressed: app.pressed == Some(control),
        selected: false,
        disabled,
    }
}

fn choice_of(control: Option<Control>) -> Option<Choice> {
    match control {
        Some(Control::Choice(choice)) => Some(choice),
        _ => None,
    }
}

fn question_and_answer(snapshot: &SurveySnapshot, app: &App, id: u32) -> Option<(Question, Answer)> {
    let index = app.controller.questions().iter().position(|q| q.id == id)?;
    Some((app.controller.questions()[index], snapshot.answers[index]))
}

fn draw_question(buf: &mut Buffer, app: &App, layout: &ScreenLayout, snapshot: &SurveySnapshot) {
    let now = app.now();
    let pulse = app.pulse();
    let slide = &app.slide;

    if let Some((Screen::Question(id), offset)) = slide.exit_offset(now)
        && let Some((question, answer)) = question_and_answer(snapshot, app, id)
    {
        render_shifted(layout.panel, buf, offset, |area, scratch| {
            QuestionPanel::new(question, answer, pulse)
                .dimmed(true)
                .render(area, scratch);
        });
    }

    if let Screen::Question(id) = slide.to
        && let Some((question, answer)) = question_and_answer(snapshot, app, id)
    {
        let faded = slide.enter_opacity(app.settings.slide_duration / 2, now) < 0.5;
        let panel = QuestionPanel::new(question, answer, pulse)
            .with_pointer(choice_of(app.hover), choice_of(app.pressed))
            .dimmed(faded);
        render_shifted(layout.panel, buf, slide.enter_offset(now), |area, scratch| {
            panel.render(area, scratch);
        });
    }
}

fn draw_nav(buf: &mut Buffer, app: &App, layout: &ScreenLayout, snapshot: &SurveySnapshot) {
    render_button(layout.reset, buf, "Reset", theme::TEXT, button_state(app, Control::Reset, false));
    render_button(
        layout.prev,
        buf,
        "<",
        theme::TEXT,
        button_state(app, Control::Prev, !snapshot.can_go_back),
    );
    render_button(
        layout.next,
        buf,
        ">",
        theme::TEXT,
        button_state(app, Control::Next, !snapshot.can_go_next),
    );
    render_button(layout.submit, buf, "Submit", theme::FOCUSED, button_state(app, Control::Submit, false));

    if layout.dots.height < 3 {
        return;
    }
    let row = layout.dots.y + 1;
    for (i, answer) in snapshot.answers.iter().enumerate() {
        let Ok(offset) = u16::try_from(i * 2 + 1) else {
            break;
        };
        let x = layout.dots.x + offset;
        if x >= layout.dots.right() {
            break;
        }
        let (symbol, color) = match answer {
            Answer::Human => ("●", theme::HUMAN),
            Answer::Ai => ("●", theme::AI),
            Answer::Unanswered => ("○", theme::MUTED),
        };
        let mut style = Style::default().fg(color);
        if i == snapshot.step {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        } else if app.hover == Some(Control::Step(i)) {
            style = style.add_modifier(Modifier::BOLD);
        }
        buf.set_string(x, row, symbol, style);
    }

    let label = format!("{} / {}", snapshot.step + 1, snapshot.question_count);
    let Ok(width) = u16::try_from(label.len()) else {
        return;
    };
    if layout.dots.width >= width {
        let x = layout.dots.x + (layout.dots.width - width) / 2;
        buf.set_string(x, layout.dots.y, label, Style::default().fg(theme::MUTED));
    }
}

fn draw_results(buf: &mut Buffer, app: &App, layout: &ScreenLayout, snapshot: &SurveySnapshot) {
    let opacity = app.results_since.map_or(1.0, |since| {
        tween::progress(since, std::time::Duration::from_millis(RESULTS_FADE_MS), app.now())
    });
    ResultsPanel {
        scores: snapshot.scores,
        opacity,
        restart: button_state(app, Control::Restart, false),
    }
    .render(layout.results, buf);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let blue = ratatui::style::Color::Blue;

    let mut hints: Vec<(&str, &str)> = if app.controller.is_result() {
        vec![("Restart", "r/Enter")]
    } else {
        vec![
            ("Human", "h/1"),
            ("AI", "a/2"),
            ("Prev/Next", "←/→"),
            ("Submit", "s"),
            ("Reset", "r"),
        ]
    };
    hints.push(("Keybindings", "?"));
    hints.push(("Quit", "q"));

    let mut spans = Vec::new();
    for (i, (action, key)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(blue)));
        }
        spans.push(Span::styled(format!("{action}: "), Style::default().fg(blue)));
        spans.push(Span::styled(*key, Style::default().fg(blue)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(popup_x, popup_y, width.min(area.width), height.min(area.height))
}

fn draw_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect(46, 17, frame.area());

    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Answering", heading)),
        Line::from("  h, H, 1        Human"),
        Line::from("  a, A, 2        AI"),
        Line::from("  Left / Right   Previous / next question"),
        Line::from("  s, Enter       Submit now"),
        Line::from("  r              Reset answers"),
        Line::from(""),
        Line::from(Span::styled("Results", heading)),
        Line::from("  r, Enter       Restart"),
        Line::from(""),
        Line::from(Span::styled("General", heading)),
        Line::from("  mouse          Click buttons, tilt the hero"),
        Line::from("  ?              This help"),
        Line::from("  q, Esc         Quit"),
    ];

    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_type(theme::BORDER_TYPE)
        .border_style(Style::default().fg(theme::FOCUSED));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}
