//! Time-based tweens: the question slide and the keyword pulse.

use std::time::{Duration, Instant};

use crate::state::Direction;

/// Cubic ease-in-out over `t` in [0, 1].
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
    }
}

/// Fraction of `duration` elapsed between `start` and `now`, in [0, 1].
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start).as_secs_f64();
    (elapsed / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Horizontal slide between two pieces of content keyed by identity.
///
/// Offsets are fractions of the panel width: `-1.0` is fully off to the
/// left, `1.0` fully off to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slide<K> {
    pub from: Option<K>,
    pub to: K,
    pub direction: Direction,
    start: Instant,
    duration: Duration,
}

impl<K: Copy + PartialEq> Slide<K> {
    /// A slide already at rest showing `key`.
    pub fn settled(key: K, now: Instant) -> Self {
        Self {
            from: None,
            to: key,
            direction: Direction::Forward,
            start: now,
            duration: Duration::ZERO,
        }
    }

    /// Retarget to `key`. A no-op when `key` is already the destination.
    ///
    /// Returns whether a new slide started.
    pub fn retarget(&mut self, key: K, direction: Direction, duration: Duration, now: Instant) -> bool {
        if key == self.to {
            return false;
        }
        *self = Self {
            from: Some(self.to),
            to: key,
            direction,
            start: now,
            duration,
        };
        true
    }

    pub fn progress(&self, now: Instant) -> f64 {
        progress(self.start, self.duration, now)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.from.is_none() || self.progress(now) >= 1.0
    }

    /// Offset of the incoming content. Forward enters from the right.
    pub fn enter_offset(&self, now: Instant) -> f64 {
        if self.from.is_none() {
            return 0.0;
        }
        let remaining = 1.0 - ease_in_out(self.progress(now));
        match self.direction {
            Direction::Forward => remaining,
            Direction::Backward => -remaining,
        }
    }

    /// Offset of the outgoing content, `None` once it is gone.
    /// Forward exits to the left.
    pub fn exit_offset(&self, now: Instant) -> Option<(K, f64)> {
        let from = self.from?;
        let p = self.progress(now);
        if p >= 1.0 {
            return None;
        }
        let travelled = ease_in_out(p);
        let offset = match self.direction {
            Direction::Forward => -travelled,
            Direction::Backward => travelled,
        };
        Some((from, offset))
    }

    /// Opacity of incoming content; fades in over the first `fade` of the slide.
    pub fn enter_opacity(&self, fade: Duration, now: Instant) -> f64 {
        if self.from.is_none() {
            return 1.0;
        }
        progress(self.start, fade, now)
    }
}

/// Endless ease-in-out oscillation between `low` and `high`.
///
/// Starts at `low`, peaks at `high` mid-period. Depends only on elapsed time,
/// so it can never hold up anything else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub period: Duration,
    pub low: f64,
    pub high: f64,
}

impl Pulse {
    /// Keyword highlight: 0.8 → 1.0 → 0.8 every three seconds.
    pub const KEYWORD: Self = Self {
        period: Duration::from_secs(3),
        low: 0.8,
        high: 1.0,
    };

    pub fn value(&self, elapsed: Duration) -> f64 {
        if self.period.is_zero() {
            return self.low;
        }
        let phase = (elapsed.as_secs_f64() / self.period.as_secs_f64()).fract();
        let half = if phase < 0.5 { phase * 2.0 } else { (1.0 - phase) * 2.0 };
        (self.high - self.low).mul_add(ease_in_out(half), self.low)
    }
}
