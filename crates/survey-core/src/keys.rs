//! Survey key bindings, independent of the terminal library.

use crate::controller::NavDirection;
use crate::state::Choice;

/// A key press as the survey sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Left,
    Right,
    Char(char),
}

/// What a bound key asks the controller to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyAction {
    Navigate(NavDirection),
    Answer(Choice),
}

impl SurveyAction {
    /// ArrowLeft/ArrowRight navigate, `1`/`h`/`H` pick Human, `2`/`a`/`A` pick AI.
    pub const fn for_key(key: KeyInput) -> Option<Self> {
        match key {
            KeyInput::Left => Some(Self::Navigate(NavDirection::Prev)),
            KeyInput::Right => Some(Self::Navigate(NavDirection::Next)),
            KeyInput::Char('1' | 'h' | 'H') => Some(Self::Answer(Choice::Human)),
            KeyInput::Char('2' | 'a' | 'A') => Some(Self::Answer(Choice::Ai)),
            KeyInput::Char(_) => None,
        }
    }
}
