//! Question panel: keyword-highlighted text above the Human / AI buttons.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use survey_core::question::Question;
use survey_core::state::{Answer, Choice};

use crate::theme;

/// Interaction state of one clickable control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub hovered: bool,
    pub pressed: bool,
    pub selected: bool,
    pub disabled: bool,
}

/// Draw a bordered button. Hover lights the border, press inverts, a
/// selected answer is filled with its color.
pub fn render_button(area: Rect, buf: &mut Buffer, label: &str, color: Color, state: ButtonState) {
    let bold = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let (border, text, fill) = if state.disabled {
        let muted = Style::default().fg(theme::DISABLED);
        (muted, muted, Style::default())
    } else if state.pressed {
        (bold, bold.fg(Color::Black), Style::default().bg(color))
    } else if state.selected {
        (bold, bold.fg(theme::HIGHLIGHT), Style::default().bg(color))
    } else if state.hovered {
        (bold, bold, Style::default())
    } else {
        (Style::default().fg(theme::MUTED), Style::default().fg(color), Style::default())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme::BORDER_TYPE)
        .border_style(border);
    Paragraph::new(Line::from(Span::styled(label.to_owned(), text)))
        .alignment(Alignment::Center)
        .style(fill)
        .block(block)
        .render(area, buf);
}

/// Where the pieces of the panel go inside its area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub text: Rect,
    pub human: Rect,
    pub ai: Rect,
}

impl PanelLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // question
                Constraint::Length(1),
                Constraint::Length(3), // buttons
            ])
            .split(area);
        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(14),
                Constraint::Length(4),
                Constraint::Length(14),
                Constraint::Min(0),
            ])
            .split(rows[2]);
        Self {
            text: rows[0],
            human: buttons[1],
            ai: buttons[3],
        }
    }
}

/// Keyword foreground for a pulse intensity in [0, 1].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn keyword_color(intensity: f64) -> Color {
    let level = (255.0 * intensity.clamp(0.0, 1.0)).round() as u8;
    Color::Rgb(level, level, level)
}

/// Question text as a styled line; keywords pulse and are underlined.
pub fn question_line(question: &Question, pulse: f64, dimmed: bool) -> Line<'static> {
    let base = if dimmed {
        Style::default().fg(theme::MUTED)
    } else {
        Style::default().fg(theme::TEXT)
    };
    let mut spans = Vec::new();
    for (i, segment) in question.segments().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", base));
        }
        let style = if segment.keyword && !dimmed {
            Style::default()
                .fg(keyword_color(pulse))
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
        } else if segment.keyword {
            base.add_modifier(Modifier::UNDERLINED)
        } else {
            base
        };
        spans.push(Span::styled(segment.word, style));
    }
    Line::from(spans)
}

/// One question with its two choice buttons.
#[derive(Clone, Copy, Debug)]
pub struct QuestionPanel {
    pub question: Question,
    pub answer: Answer,
    pub human: ButtonState,
    pub ai: ButtonState,
    /// Keyword pulse intensity.
    pub pulse: f64,
    /// Drawn faded, e.g. while sliding in or out.
    pub dimmed: bool,
}

impl QuestionPanel {
    pub const fn new(question: Question, answer: Answer, pulse: f64) -> Self {
        Self {
            question,
            answer,
            human: ButtonState {
                hovered: false,
                pressed: false,
                selected: matches!(answer, Answer::Human),
                disabled: false,
            },
            ai: ButtonState {
                hovered: false,
                pressed: false,
                selected: matches!(answer, Answer::Ai),
                disabled: false,
            },
            pulse,
            dimmed: false,
        }
    }

    #[must_use]
    pub const fn with_pointer(mut self, hovered: Option<Choice>, pressed: Option<Choice>) -> Self {
        self.human.hovered = matches!(hovered, Some(Choice::Human));
        self.ai.hovered = matches!(hovered, Some(Choice::Ai));
        self.human.pressed = matches!(pressed, Some(Choice::Human));
        self.ai.pressed = matches!(pressed, Some(Choice::Ai));
        self
    }

    #[must_use]
    pub const fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }
}

impl Widget for QuestionPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PanelLayout::compute(area);
        Paragraph::new(question_line(&self.question, self.pulse, self.dimmed))
            .alignment(Alignment::Center)
            .render(layout.text, buf);
        render_button(layout.human, buf, "Human", theme::HUMAN, self.human);
        render_button(layout.ai, buf, "AI", theme::AI, self.ai);
    }
}

/// Render `draw` into an off-screen buffer the size of `area`, then copy it
/// into `buf` shifted horizontally by `offset` panel widths. Cells pushed
/// outside `area` are dropped.
#[allow(clippy::cast_possible_truncation)]
pub fn render_shifted(area: Rect, buf: &mut Buffer, offset: f64, draw: impl FnOnce(Rect, &mut Buffer)) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let local = Rect::new(0, 0, area.width, area.height);
    let mut scratch = Buffer::empty(local);
    draw(local, &mut scratch);

    let dx = (offset * f64::from(area.width)).round() as i32;
    for y in 0..area.height {
        for x in 0..area.width {
            let target_x = i32::from(x) + dx;
            if target_x < 0 || target_x >= i32::from(area.width) {
                continue;
            }
            let Some(src) = scratch.cell((x, y)) else {
                continue;
            };
            if src.symbol() == " " && src.bg == Color::Reset {
                continue;
            }
            let src = src.clone();
            if let Some(dst) = buf.cell_mut((area.x + target_x as u16, area.y + y)) {
                *dst = src;
            }
        }
    }
}
