//! Hero panel: face art with two spring-driven fill columns and pointer tilt.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use survey_core::animation::{Spring, SpringConfig};
use survey_core::hero::{Bounds, FillLevels, Tilt};

use crate::ambient::Ambient;
use crate::theme;

/// Face art drawn behind the fill. Left half human, right half machine.
const ART: [&str; 11] = [
    r"      .-''''''-. .========.      ",
    r"    .'         | |  ____  '.    ",
    r"   /   .--.    | |  [__]    \   ",
    r"  |   ( () )   | |  [<>]     |  ",
    r"  |    '--'    | |           |  ",
    r"  |      )     | |    ||     |  ",
    r"  |     (__    | |   _||_    |  ",
    r"   \  \____/   | |  [====]  /   ",
    r"    '.         | |         .'   ",
    r"      '-.____.-' '========'     ",
    r"        HUMAN       A.I.        ",
];

/// Largest art shift, in cells, at full tilt.
const MAX_SHIFT_X: f64 = 2.0;
const MAX_SHIFT_Y: f64 = 1.0;

const EIGHTHS: [&str; 8] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇"];

/// Animated state of the hero panel.
#[derive(Debug)]
pub struct HeroView {
    human: Spring,
    ai: Spring,
    tilt: Tilt,
    max_tilt_deg: f64,
    pointer_inside: bool,
}

impl HeroView {
    pub fn new(fill: SpringConfig, tilt: SpringConfig, max_tilt_deg: f64) -> Self {
        Self {
            human: Spring::new(fill, 0.0),
            ai: Spring::new(fill, 0.0),
            tilt: Tilt::new(tilt, max_tilt_deg),
            max_tilt_deg,
            pointer_inside: false,
        }
    }

    pub fn set_levels(&mut self, levels: FillLevels) {
        self.human.set_target(levels.human);
        self.ai.set_target(levels.ai);
    }

    pub fn step(&mut self, dt: f64) {
        self.human.step(dt);
        self.ai.step(dt);
        self.tilt.step(dt);
    }

    /// Current animated heights, clamped to [0, 100] for drawing.
    pub fn levels(&self) -> FillLevels {
        FillLevels {
            human: self.human.value().clamp(0.0, 100.0),
            ai: self.ai.value().clamp(0.0, 100.0),
        }
    }

    /// Unclamped spring values; may briefly exceed the target.
    pub const fn raw_levels(&self) -> (f64, f64) {
        (self.human.value(), self.ai.value())
    }

    pub fn targets(&self) -> FillLevels {
        FillLevels {
            human: self.human.target(),
            ai: self.ai.target(),
        }
    }

    pub fn rotation(&self) -> (f64, f64) {
        self.tilt.rotation()
    }

    pub const fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Feed a pointer position. Leaving `area` resets the tilt target.
    pub fn pointer_at(&mut self, area: Rect, column: u16, row: u16) {
        let bounds = Bounds {
            x: f64::from(area.x),
            y: f64::from(area.y),
            width: f64::from(area.width),
            height: f64::from(area.height),
        };
        // Cell centers, so the middle column maps to zero.
        let (px, py) = (f64::from(column) + 0.5, f64::from(row) + 0.5);
        if bounds.contains(px, py) {
            self.pointer_inside = true;
            self.tilt.pointer_moved(&bounds, px, py);
        } else {
            self.pointer_left();
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer_inside = false;
        self.tilt.pointer_left();
    }

    /// Cell shift derived from the current rotation.
    #[allow(clippy::cast_possible_truncation)]
    fn shift(&self) -> (i16, i16) {
        if self.max_tilt_deg <= 0.0 {
            return (0, 0);
        }
        let (rx, ry) = self.tilt.rotation();
        let dx = (ry / self.max_tilt_deg * MAX_SHIFT_X).round() as i16;
        let dy = (-rx / self.max_tilt_deg * MAX_SHIFT_Y).round() as i16;
        (dx, dy)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, ambient: &Ambient, counts: (usize, usize)) {
        let border = if self.pointer_inside { theme::HIGHLIGHT } else { theme::MUTED };
        let block = Block::default()
            .title(" Human vs AI ")
            .borders(Borders::ALL)
            .border_type(theme::BORDER_TYPE)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 2 || inner.height < 2 {
            return;
        }

        let (dx, dy) = self.shift();
        draw_art(inner, buf, dx, dy);
        ambient.render(inner, buf);

        let half = inner.width / 2;
        let left = Rect::new(inner.x, inner.y, half, inner.height);
        let right = Rect::new(inner.x + half, inner.y, inner.width - half, inner.height);
        let levels = self.levels();
        draw_fill(left, buf, levels.human, theme::HUMAN_FILL);
        draw_fill(right, buf, levels.ai, theme::AI_FILL);

        draw_label(left, buf, &format!("Human {}", counts.0), theme::HUMAN, false);
        draw_label(right, buf, &format!("AI {}", counts.1), theme::AI, true);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_art(area: Rect, buf: &mut Buffer, dx: i16, dy: i16) {
    let art_width = ART.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let art_height = ART.len() as i32;
    let origin_x = i32::from(area.x) + (i32::from(area.width) - art_width) / 2 + i32::from(dx);
    let origin_y = i32::from(area.y) + (i32::from(area.height) - art_height) / 2 + i32::from(dy);
    let style = Style::default().fg(theme::ART);

    for (row, line) in ART.iter().enumerate() {
        let y = origin_y + row as i32;
        if y < i32::from(area.y) || y >= i32::from(area.bottom()) {
            continue;
        }
        for (col, ch) in line.chars().enumerate() {
            let x = origin_x + col as i32;
            if ch == ' ' || x < i32::from(area.x) || x >= i32::from(area.right()) {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}

/// Paint a column bottom-up to `pct` percent of its height. Whole rows get
/// the fill background; the top fractional row gets an eighth block when the
/// cell is otherwise empty.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_fill(area: Rect, buf: &mut Buffer, pct: f64, color: Color) {
    let rows = pct.clamp(0.0, 100.0) / 100.0 * f64::from(area.height);
    let full = rows.floor() as u16;
    let eighths = ((rows - rows.floor()) * 8.0).floor() as usize;

    for i in 0..full.min(area.height) {
        let y = area.bottom() - 1 - i;
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_bg(color);
            }
        }
    }
    if full < area.height && eighths > 0 {
        let y = area.bottom() - 1 - full;
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y))
                && cell.symbol() == " "
            {
                cell.set_symbol(EIGHTHS[eighths]);
                cell.set_fg(color);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_label(area: Rect, buf: &mut Buffer, text: &str, color: Color, align_right: bool) {
    let width = text.chars().count() as u16;
    if width + 2 > area.width {
        return;
    }
    let x = if align_right {
        area.right() - width - 1
    } else {
        area.x + 1
    };
    buf.set_string(
        x,
        area.y,
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    );
}
