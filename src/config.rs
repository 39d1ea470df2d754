//! Survey configuration (`survey.toml`).
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration. Unknown keys are rejected so typos surface as errors.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use survey_core::animation::SpringConfig;
use survey_core::controller::DEFAULT_ADVANCE_DELAY;
use survey_core::hero::MAX_TILT_DEG;
use survey_tui::Settings;
use tracing::warn;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "survey.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveyConfig {
    #[serde(default)]
    pub survey: SurveySection,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// SurveySection
// ---------------------------------------------------------------------------

/// Survey flow settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveySection {
    /// Pause between answering and moving on (default: 300).
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
}

impl Default for SurveySection {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay_ms(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn default_advance_delay_ms() -> u64 {
    DEFAULT_ADVANCE_DELAY.as_millis() as u64
}

// ---------------------------------------------------------------------------
// AnimationConfig
// ---------------------------------------------------------------------------

/// Spring and tween tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    /// Hero fill columns.
    #[serde(default = "default_fill")]
    pub fill: SpringConfig,

    /// Pointer tilt smoothing.
    #[serde(default = "default_tilt")]
    pub tilt: SpringConfig,

    #[serde(default = "default_max_tilt_deg")]
    pub max_tilt_deg: f64,

    /// Question slide duration (default: 800).
    #[serde(default = "default_slide_ms")]
    pub slide_ms: u64,

    /// Keyword pulse period (default: 3000).
    #[serde(default = "default_pulse_period_ms")]
    pub pulse_period_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fill: default_fill(),
            tilt: default_tilt(),
            max_tilt_deg: default_max_tilt_deg(),
            slide_ms: default_slide_ms(),
            pulse_period_ms: default_pulse_period_ms(),
        }
    }
}

const fn default_fill() -> SpringConfig {
    SpringConfig::FILL
}

const fn default_tilt() -> SpringConfig {
    SpringConfig::TILT
}

const fn default_max_tilt_deg() -> f64 {
    MAX_TILT_DEG
}

const fn default_slide_ms() -> u64 {
    800
}

const fn default_pulse_period_ms() -> u64 {
    3000
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Capture the mouse for clicks and hero tilt.
    #[serde(default = "default_mouse")]
    pub mouse: bool,

    /// Frame interval in milliseconds (default: 16).
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,

    /// Number of background particles (default: 24).
    #[serde(default = "default_particles")]
    pub particles: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse: default_mouse(),
            frame_ms: default_frame_ms(),
            particles: default_particles(),
        }
    }
}

const fn default_mouse() -> bool {
    true
}

const fn default_frame_ms() -> u64 {
    16
}

const fn default_particles() -> usize {
    24
}

// ---------------------------------------------------------------------------
// LogConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Write JSON log lines here. The terminal belongs to the UI, so this
    /// is the only way to see logs while the survey runs.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

const MAX_PARTICLES: usize = 500;

impl SurveyConfig {
    /// Runtime settings for the terminal front end. Out-of-range values are
    /// replaced with defaults and logged.
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();

        let fill = self.animation.fill.sanitized(SpringConfig::FILL);
        if fill != self.animation.fill {
            warn!(fill = ?self.animation.fill, "invalid fill spring; using default");
        }
        let tilt = self.animation.tilt.sanitized(SpringConfig::TILT);
        if tilt != self.animation.tilt {
            warn!(tilt = ?self.animation.tilt, "invalid tilt spring; using default");
        }

        let max_tilt_deg = if self.animation.max_tilt_deg.is_finite() && self.animation.max_tilt_deg >= 0.0
        {
            self.animation.max_tilt_deg
        } else {
            warn!(value = self.animation.max_tilt_deg, "invalid max_tilt_deg; using default");
            defaults.max_tilt_deg
        };

        let frame_ms = if self.ui.frame_ms == 0 {
            warn!("frame_ms must be positive; using default");
            default_frame_ms()
        } else {
            self.ui.frame_ms
        };

        let particles = if self.ui.particles > MAX_PARTICLES {
            warn!(requested = self.ui.particles, max = MAX_PARTICLES, "too many particles; capping");
            MAX_PARTICLES
        } else {
            self.ui.particles
        };

        Settings {
            advance_delay: Duration::from_millis(self.survey.advance_delay_ms),
            fill_spring: fill,
            tilt_spring: tilt,
            max_tilt_deg,
            slide_duration: Duration::from_millis(self.animation.slide_ms),
            pulse_period: Duration::from_millis(self.animation.pulse_period_ms),
            mouse: self.ui.mouse,
            frame_interval: Duration::from_millis(frame_ms),
            particles,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Error loading or parsing the config file.
#[derive(Debug)]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl SurveyConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                let line = toml_str[..span.start].chars().filter(|&c| c == '\n').count() + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError { path: None, message }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
