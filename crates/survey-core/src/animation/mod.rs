//! Animation primitives driven by explicit time steps.

pub mod spring;
pub mod tween;

pub use spring::{Spring, SpringConfig};
pub use tween::{Pulse, Slide, ease_in_out};
