//! Results panel: final tally and the restart button.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use survey_core::state::Scores;

use crate::question::{ButtonState, render_button};
use crate::theme;

/// What the results panel asks of its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultsCommand {
    Restart,
}

/// Which way the answers leaned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    NoAnswers,
    Human,
    Ai,
    Even,
}

impl Verdict {
    pub const fn from_scores(scores: Scores) -> Self {
        if scores.human == 0 && scores.ai == 0 {
            Self::NoAnswers
        } else if scores.human > scores.ai {
            Self::Human
        } else if scores.ai > scores.human {
            Self::Ai
        } else {
            Self::Even
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::NoAnswers => "No answers yet. Give it a go!",
            Self::Human => "You put your faith in humans.",
            Self::Ai => "You lean towards the machines.",
            Self::Even => "Perfectly balanced between human and machine.",
        }
    }
}

/// Percent of `part` in `whole`, rounded; zero when nothing was answered.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultsLayout {
    pub text: Rect,
    pub restart: Rect,
}

impl ResultsLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // heading, tally, verdict
                Constraint::Length(1),
                Constraint::Length(3), // restart
            ])
            .split(area);
        let button = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(16), Constraint::Min(0)])
            .split(rows[2]);
        Self {
            text: rows[0],
            restart: button[1],
        }
    }
}

/// Tally of the finished survey. Fades in via `opacity`.
#[derive(Clone, Copy, Debug)]
pub struct ResultsPanel {
    pub scores: Scores,
    pub opacity: f64,
    pub restart: ButtonState,
}

impl ResultsPanel {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let faded = self.opacity < 0.5;
        let style = |color| {
            if faded {
                Style::default().fg(theme::MUTED)
            } else {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            }
        };
        let answered = self.scores.answered();
        vec![
            Line::from(Span::styled("Results", style(theme::HIGHLIGHT))),
            Line::from(vec![
                Span::styled(format!("Human {}", self.scores.human), style(theme::HUMAN)),
                Span::styled("  vs  ", style(theme::TEXT)),
                Span::styled(format!("AI {}", self.scores.ai), style(theme::AI)),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{}%", percent(self.scores.human, answered)),
                    style(theme::HUMAN),
                ),
                Span::styled(format!("  of {answered} answered  "), style(theme::MUTED)),
                Span::styled(format!("{}%", percent(self.scores.ai, answered)), style(theme::AI)),
            ]),
            Line::from(Span::styled(
                Verdict::from_scores(self.scores).message(),
                style(theme::TEXT),
            )),
        ]
    }
}

impl Widget for ResultsPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = ResultsLayout::compute(area);
        Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .render(layout.text, buf);
        render_button(layout.restart, buf, "Restart", theme::FOCUSED, self.restart);
    }
}
