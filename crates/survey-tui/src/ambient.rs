//! Decorative background: slow particles drifting up behind the hero.
//!
//! Owns its own RNG and positions and never reads survey state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme;

const GLYPHS: [&str; 3] = ["·", "∙", "˙"];

#[derive(Clone, Copy, Debug, PartialEq)]
struct Particle {
    /// Horizontal position, fraction of the width.
    x: f64,
    /// Vertical position, fraction of the height (0 = top).
    y: f64,
    /// Rise speed in heights per second.
    speed: f64,
    glyph: usize,
}

#[derive(Debug)]
pub struct Ambient {
    rng: StdRng,
    particles: Vec<Particle>,
}

impl Ambient {
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic field for tests.
    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::with_rng(count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, mut rng: StdRng) -> Self {
        let particles = (0..count).map(|_| spawn(&mut rng, None)).collect();
        Self { rng, particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        for p in &mut self.particles {
            p.y -= p.speed * dt;
            if p.y < 0.0 {
                *p = spawn(&mut self.rng, Some(1.0));
            }
        }
    }

    /// Paint particles into empty cells of `area`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for p in &self.particles {
            let x = area.x + (p.x * f64::from(area.width - 1)).round() as u16;
            let y = area.y + (p.y * f64::from(area.height - 1)).round() as u16;
            if let Some(cell) = buf.cell_mut((x, y))
                && cell.symbol() == " "
            {
                cell.set_symbol(GLYPHS[p.glyph]);
                cell.set_style(Style::default().fg(theme::PARTICLE));
            }
        }
    }

    #[cfg(test)]
    fn positions(&self) -> Vec<(f64, f64)> {
        self.particles.iter().map(|p| (p.x, p.y)).collect()
    }
}

fn spawn(rng: &mut StdRng, y: Option<f64>) -> Particle {
    Particle {
        x: rng.random_range(0.0..1.0),
        y: y.unwrap_or_else(|| rng.random_range(0.0..1.0)),
        speed: rng.random_range(0.02..0.08),
        glyph: rng.random_range(0..GLYPHS.len()),
    }
}
