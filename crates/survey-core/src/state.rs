//! Survey state: answers, step and the derived scores.

use std::fmt;

use serde::Serialize;

/// A selection made by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Human,
    Ai,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Ai => write!(f, "ai"),
        }
    }
}

/// The recorded answer for one question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    #[default]
    Unanswered,
    Human,
    Ai,
}

impl Answer {
    pub const fn is_answered(self) -> bool {
        !matches!(self, Self::Unanswered)
    }

    pub const fn choice(self) -> Option<Choice> {
        match self {
            Self::Unanswered => None,
            Self::Human => Some(Choice::Human),
            Self::Ai => Some(Choice::Ai),
        }
    }
}

impl From<Choice> for Answer {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Human => Self::Human,
            Choice::Ai => Self::Ai,
        }
    }
}

/// Which way the last navigation went. Only picks animation sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Counts derived from the answers. Never stored alongside them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub human: usize,
    pub ai: usize,
}

impl Scores {
    pub fn from_answers(answers: &[Answer]) -> Self {
        answers.iter().fold(Self::default(), |mut acc, a| {
            match a {
                Answer::Human => acc.human += 1,
                Answer::Ai => acc.ai += 1,
                Answer::Unanswered => {}
            }
            acc
        })
    }

    pub const fn answered(self) -> usize {
        self.human + self.ai
    }
}

/// Canonical survey state.
///
/// `current_step == len` is the results view. `answers` always holds exactly
/// one entry per question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SurveyState {
    answers: Vec<Answer>,
    current_step: usize,
    direction: Direction,
}

impl SurveyState {
    pub fn new(question_count: usize) -> Self {
        Self {
            answers: vec![Answer::Unanswered; question_count],
            current_step: 0,
            direction: Direction::Forward,
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub const fn current_step(&self) -> usize {
        self.current_step
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scores(&self) -> Scores {
        Scores::from_answers(&self.answers)
    }

    pub fn is_result(&self) -> bool {
        self.current_step >= self.answers.len()
    }

    /// Answer at the current step, `None` at the results view.
    pub fn current_answer(&self) -> Option<Answer> {
        self.answers.get(self.current_step).copied()
    }

    /// Record `choice` at the current step. No-op at the results view.
    pub(crate) fn record(&mut self, choice: Choice) -> bool {
        let Some(slot) = self.answers.get_mut(self.current_step) else {
            return false;
        };
        *slot = choice.into();
        self.direction = Direction::Forward;
        true
    }

    /// Move to `step` (clamped to the results view) with an explicit direction.
    pub(crate) fn set_step(&mut self, step: usize, direction: Direction) {
        self.current_step = step.min(self.answers.len());
        self.direction = direction;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.answers.len());
    }
}
