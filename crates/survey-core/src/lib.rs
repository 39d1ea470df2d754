//! survey-core: the Human vs AI survey without a screen.
//!
//! Everything here is a pure function of explicit inputs: the controller
//! takes `now` as a parameter instead of reading a clock, and the animation
//! primitives are stepped by the caller. The terminal front end lives in
//! `survey-tui`.

pub mod animation;
pub mod controller;
pub mod hero;
pub mod keys;
pub mod question;
pub mod state;

pub use controller::{NavDirection, SurveyController, SurveySnapshot};
pub use hero::{Bounds, FillLevels, Tilt, fill_total};
pub use keys::{KeyInput, SurveyAction};
pub use question::{KEYWORDS, QUESTIONS, Question};
pub use state::{Answer, Choice, Direction, Scores, SurveyState};
