//! Damped spring tracking a scalar target.
//!
//! Integrated with semi-implicit Euler in fixed sub-steps so the result does
//! not depend on frame rate jitter.

use serde::{Deserialize, Serialize};

/// Longest integration step, in seconds.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;
/// Frames longer than this are treated as a stall and truncated.
const MAX_FRAME: f64 = 0.25;
const REST_DISTANCE: f64 = 0.001;
const REST_VELOCITY: f64 = 0.001;

/// Spring tuning: acceleration is `(-stiffness * offset - damping * velocity) / mass`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    /// Slow, slightly bouncy fill for the hero columns.
    pub const FILL: Self = Self {
        stiffness: 40.0,
        damping: 10.0,
        mass: 1.2,
    };

    /// Snappy smoothing for pointer tilt.
    pub const TILT: Self = Self {
        stiffness: 150.0,
        damping: 15.0,
        mass: 1.0,
    };

    /// Damping ratio; below 1.0 the spring overshoots its target.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Whether one integration sub-step stays well inside the stable region.
    ///
    /// Semi-implicit Euler is stable while `2a + b < 4`, with `a = damping * h / mass`
    /// and `b = stiffness * h^2 / mass`; half that keeps motion smooth.
    pub fn is_stable(&self) -> bool {
        let h = MAX_SUBSTEP;
        let a = self.damping / self.mass * h;
        let b = self.stiffness / self.mass * h * h;
        2.0f64.mul_add(a, b) < 2.0
    }

    /// Invalid or unstable parameters fall back to `fallback`.
    pub fn sanitized(self, fallback: Self) -> Self {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        let positive =
            ok(self.stiffness) && ok(self.mass) && self.damping.is_finite() && self.damping >= 0.0;
        if positive && self.is_stable() {
            self
        } else {
            fallback
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub const fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn target(&self) -> f64 {
        self.target
    }

    pub const fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` with no motion.
    pub const fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        (self.value - self.target).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance the simulation by `dt` seconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn step(&mut self, dt: f64) {
        if self.is_at_rest() {
            self.snap_to(self.target);
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME);
        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / f64::from(steps);
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        for _ in 0..steps {
            let force = -stiffness * (self.value - self.target) - damping * self.velocity;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
        }
        if !self.value.is_finite() || !self.velocity.is_finite() {
            self.snap_to(self.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f64) -> f64 {
        let mut peak = spring.value();
        let mut t = 0.0;
        while t < seconds {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
            t += 1.0 / 60.0;
        }
        peak
    }

    #[test]
    fn converges_to_target() {
        let mut s = Spring::new(SpringConfig::FILL, 0.0);
        s.set_target(100.0);
        run(&mut s, 6.0);
        assert!((s.value() - 100.0).abs() < 0.5, "value {}", s.value());
    }

    #[test]
    fn fill_spring_overshoots() {
        assert!(SpringConfig::FILL.damping_ratio() < 1.0);
        let mut s = Spring::new(SpringConfig::FILL, 0.0);
        s.set_target(100.0);
        let peak = run(&mut s, 4.0);
        assert!(peak > 100.0, "peak {peak}");
        assert!(peak < 120.0, "peak {peak}");
    }

    #[test]
    fn tilt_spring_settles_quickly() {
        let mut s = Spring::new(SpringConfig::TILT, 0.0);
        s.set_target(5.0);
        run(&mut s, 1.0);
        assert!((s.value() - 5.0).abs() < 0.1, "value {}", s.value());
    }

    #[test]
    fn frame_size_does_not_change_outcome_much() {
        let mut coarse = Spring::new(SpringConfig::FILL, 0.0);
        let mut fine = Spring::new(SpringConfig::FILL, 0.0);
        coarse.set_target(50.0);
        fine.set_target(50.0);
        for _ in 0..10 {
            coarse.step(0.1);
        }
        for _ in 0..100 {
            fine.step(0.01);
        }
        assert!((coarse.value() - fine.value()).abs() < 1.0);
    }

    #[test]
    fn ignores_bad_dt() {
        let mut s = Spring::new(SpringConfig::TILT, 0.0);
        s.set_target(1.0);
        s.step(f64::NAN);
        s.step(-1.0);
        s.step(0.0);
        assert!(s.value().abs() < f64::EPSILON);
    }

    #[test]
    fn rests_snap_to_target() {
        let mut s = Spring::new(SpringConfig::TILT, 0.0);
        s.set_target(0.0005);
        s.step(0.016);
        assert!((s.value() - 0.0005).abs() < f64::EPSILON);
        assert!(s.is_at_rest());
    }

    #[test]
    fn sanitized_rejects_zero_mass() {
        let bad = SpringConfig {
            stiffness: 10.0,
            damping: 1.0,
            mass: 0.0,
        };
        assert_eq!(bad.sanitized(SpringConfig::FILL), SpringConfig::FILL);
        assert_eq!(SpringConfig::TILT.sanitized(SpringConfig::FILL), SpringConfig::TILT);
    }

    #[test]
    fn sanitized_rejects_unstable_stiffness() {
        assert!(SpringConfig::FILL.is_stable());
        assert!(SpringConfig::TILT.is_stable());
        let stiff = SpringConfig {
            stiffness: 1e7,
            damping: 10.0,
            mass: 1.0,
        };
        let heavy_damping = SpringConfig {
            stiffness: 10.0,
            damping: 1e6,
            mass: 1.0,
        };
        assert!(!stiff.is_stable());
        assert_eq!(stiff.sanitized(SpringConfig::FILL), SpringConfig::FILL);
        assert_eq!(heavy_damping.sanitized(SpringConfig::TILT), SpringConfig::TILT);
    }

    #[test]
    fn diverging_spring_snaps_to_target() {
        let mut s = Spring::new(
            SpringConfig {
                stiffness: 1e7,
                damping: 10.0,
                mass: 1.0,
            },
            0.0,
        );
        s.set_target(100.0);
        for _ in 0..60 {
            s.step(1.0 / 60.0);
            assert!(s.value().is_finite(), "value {}", s.value());
        }
        assert!((s.value() - 100.0).abs() < f64::EPSILON);
        assert!(s.is_at_rest());
    }
}
