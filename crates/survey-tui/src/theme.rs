use ratatui::style::Color;
use ratatui::widgets::block::BorderType;

// Side colors
pub const HUMAN: Color = Color::Cyan;
pub const AI: Color = Color::Magenta;
pub const HUMAN_FILL: Color = Color::Rgb(0, 95, 135);
pub const AI_FILL: Color = Color::Rgb(110, 30, 120);

// Text
pub const TEXT: Color = Color::Gray;
pub const HIGHLIGHT: Color = Color::White;
pub const MUTED: Color = Color::DarkGray;

// Controls
pub const FOCUSED: Color = Color::Green;
pub const DISABLED: Color = Color::DarkGray;
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

// Decoration
pub const ART: Color = Color::Gray;
pub const PARTICLE: Color = Color::DarkGray;
