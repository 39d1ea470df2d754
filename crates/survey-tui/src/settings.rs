use std::time::Duration;

use survey_core::animation::SpringConfig;
use survey_core::controller::DEFAULT_ADVANCE_DELAY;
use survey_core::hero::MAX_TILT_DEG;

/// Runtime knobs for the terminal front end.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub advance_delay: Duration,
    pub fill_spring: SpringConfig,
    pub tilt_spring: SpringConfig,
    pub max_tilt_deg: f64,
    pub slide_duration: Duration,
    pub pulse_period: Duration,
    pub mouse: bool,
    pub frame_interval: Duration,
    pub particles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
            fill_spring: SpringConfig::FILL,
            tilt_spring: SpringConfig::TILT,
            max_tilt_deg: MAX_TILT_DEG,
            slide_duration: Duration::from_millis(800),
            pulse_period: Duration::from_secs(3),
            mouse: true,
            frame_interval: Duration::from_millis(16),
            particles: 24,
        }
    }
}
