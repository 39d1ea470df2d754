//! Hero visualization model: fill percentages and pointer tilt.

use serde::Serialize;

use crate::animation::{Spring, SpringConfig};
use crate::state::Scores;

/// Default tilt bound, in degrees, on each axis.
pub const MAX_TILT_DEG: f64 = 5.0;

/// Denominator for the fill columns.
///
/// While answering this is the question count. At the results view it is
/// the number answered, unless nothing was answered, in which case it falls
/// back to the question count. Never zero for a non-empty survey.
pub const fn fill_total(scores: Scores, is_result: bool, question_count: usize) -> usize {
    let answered = scores.answered();
    if is_result && answered > 0 {
        answered
    } else {
        question_count
    }
}

/// Column heights in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FillLevels {
    pub human: f64,
    pub ai: f64,
}

impl FillLevels {
    /// `score / total * 100`, clamped to [0, 100]. A zero total yields 0.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(human: usize, ai: usize, total: usize) -> Self {
        if total == 0 {
            return Self::default();
        }
        let pct = |score: usize| (score as f64 / total as f64 * 100.0).clamp(0.0, 100.0);
        Self {
            human: pct(human),
            ai: pct(ai),
        }
    }

    pub fn from_scores(scores: Scores, total: usize) -> Self {
        Self::compute(scores.human, scores.ai, total)
    }
}

/// Rectangle in any unit, used to normalize pointer positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Pointer position mapped to [-0.5, 0.5] on both axes.
    pub fn normalize(&self, px: f64, py: f64) -> (f64, f64) {
        let axis = |p: f64, origin: f64, extent: f64| {
            if extent <= 0.0 {
                0.0
            } else {
                ((p - origin) / extent - 0.5).clamp(-0.5, 0.5)
            }
        };
        (axis(px, self.x, self.width), axis(py, self.y, self.height))
    }
}

/// Spring-smoothed tilt following the pointer.
#[derive(Clone, Copy, Debug)]
pub struct Tilt {
    x: Spring,
    y: Spring,
    max_deg: f64,
}

impl Default for Tilt {
    fn default() -> Self {
        Self::new(SpringConfig::TILT, MAX_TILT_DEG)
    }
}

impl Tilt {
    pub const fn new(config: SpringConfig, max_deg: f64) -> Self {
        Self {
            x: Spring::new(config, 0.0),
            y: Spring::new(config, 0.0),
            max_deg,
        }
    }

    /// Pointer moved to `(px, py)` inside `bounds`.
    pub fn pointer_moved(&mut self, bounds: &Bounds, px: f64, py: f64) {
        let (nx, ny) = bounds.normalize(px, py);
        self.x.set_target(nx);
        self.y.set_target(ny);
    }

    /// Pointer left the hero: drift back to neutral.
    pub const fn pointer_left(&mut self) {
        self.x.set_target(0.0);
        self.y.set_target(0.0);
    }

    pub fn step(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
    }

    /// `(rotate_x, rotate_y)` in degrees. Pointer low tilts the top away
    /// (negative x rotation); pointer right turns toward positive y rotation.
    pub fn rotation(&self) -> (f64, f64) {
        let scale = self.max_deg * 2.0;
        (-self.y.value() * scale, self.x.value() * scale)
    }

    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_fill_levels_bounded(human in 0usize..=10, ai in 0usize..=10, is_result in any::<bool>()) {
            prop_assume!(human + ai <= 10);
            let scores = Scores { human, ai };
            let total = fill_total(scores, is_result, 10);
            prop_assert!(total > 0);
            let levels = FillLevels::compute(human, ai, total);
            for v in [levels.human, levels.ai] {
                prop_assert!(v.is_finite());
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}
