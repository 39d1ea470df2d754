//! human-ai-survey: ten quick questions, human or AI, in the terminal.
//!
//! The survey logic lives in `survey-core` and the screen in `survey-tui`;
//! this crate adds configuration, telemetry and the listing commands used
//! by the binary.

pub mod config;
pub mod format;
pub mod questions;
pub mod telemetry;
