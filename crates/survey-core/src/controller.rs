//! The survey controller: single writer of [`SurveyState`].
//!
//! The only deferred behavior is the auto-advance after an answer. It is
//! kept as an owned deadline ([`PendingAdvance`]) and evaluated against the
//! *current* state when [`SurveyController::poll`] runs, so nothing ever acts
//! on a captured copy of an older step. Cancelling it is dropping it.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::hero::fill_total;
use crate::keys::{KeyInput, SurveyAction};
use crate::question::{QUESTIONS, Question};
use crate::state::{Answer, Choice, Direction, Scores, SurveyState};

/// Delay between a selection and the automatic move to the next question.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(300);

/// Manual navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Prev,
    Next,
}

/// An auto-advance waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingAdvance {
    due: Instant,
    /// Step the answer was given on. If the user has moved since, the
    /// advance is stale and gets dropped.
    from_step: usize,
}

/// Read-only view of the survey handed to the renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SurveySnapshot {
    pub step: usize,
    pub question_count: usize,
    pub direction: Direction,
    pub answers: Vec<Answer>,
    pub scores: Scores,
    pub is_result: bool,
    pub question: Option<Question>,
    pub can_go_back: bool,
    pub can_go_next: bool,
    pub advance_pending: bool,
}

impl SurveySnapshot {
    pub const fn human_score(&self) -> usize {
        self.scores.human
    }

    pub const fn ai_score(&self) -> usize {
        self.scores.ai
    }

    /// Denominator for the hero fill columns.
    pub const fn fill_total(&self) -> usize {
        fill_total(self.scores, self.is_result, self.question_count)
    }
}

#[derive(Debug)]
pub struct SurveyController {
    questions: &'static [Question],
    state: SurveyState,
    advance_delay: Duration,
    pending: Option<PendingAdvance>,
}

impl Default for SurveyController {
    fn default() -> Self {
        Self::new(&QUESTIONS, DEFAULT_ADVANCE_DELAY)
    }
}

impl SurveyController {
    pub fn new(questions: &'static [Question], advance_delay: Duration) -> Self {
        Self {
            questions,
            state: SurveyState::new(questions.len()),
            advance_delay,
            pending: None,
        }
    }

    pub const fn state(&self) -> &SurveyState {
        &self.state
    }

    pub const fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub const fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_result(&self) -> bool {
        self.state.is_result()
    }

    pub fn scores(&self) -> Scores {
        self.state.scores()
    }

    /// The question on screen, `None` at the results view.
    pub fn current_question(&self) -> Option<Question> {
        self.questions.get(self.state.current_step()).copied()
    }

    pub const fn advance_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending auto-advance, if any. The event loop uses it
    /// to shorten its poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Record `choice` for the current question and schedule the advance.
    ///
    /// Returns `false` at the results view. Answering again before the
    /// delay elapses replaces the pending advance, so the step moves once.
    pub fn answer(&mut self, choice: Choice, now: Instant) -> bool {
        let step = self.state.current_step();
        if !self.state.record(choice) {
            return false;
        }
        let due = now + self.advance_delay;
        if self.pending.replace(PendingAdvance { due, from_step: step }).is_some() {
            debug!(step, %choice, "re-answered before advance; rescheduled");
        } else {
            debug!(step, %choice, "answered");
        }
        true
    }

    /// Fire the pending advance if its deadline has passed.
    ///
    /// Returns whether the step changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        self.pending = None;
        if self.state.current_step() != pending.from_step {
            debug!(
                from_step = pending.from_step,
                step = self.state.current_step(),
                "dropping stale advance"
            );
            return false;
        }
        let next = (pending.from_step + 1).min(self.question_count());
        self.state.set_step(next, Direction::Forward);
        debug!(step = next, "auto-advanced");
        next != pending.from_step
    }

    /// Cancel the pending advance. Called when the survey view goes away.
    pub fn deactivate(&mut self) {
        if self.pending.take().is_some() {
            debug!("cancelled pending advance");
        }
    }

    pub fn navigate(&mut self, direction: NavDirection) {
        self.pending = None;
        let step = self.state.current_step();
        match direction {
            NavDirection::Prev => {
                self.state.set_step(step.saturating_sub(1), Direction::Backward);
            }
            NavDirection::Next => {
                self.state.set_step(step + 1, Direction::Forward);
            }
        }
        debug!(from = step, to = self.state.current_step(), ?direction, "navigated");
    }

    pub const fn can_go_back(&self) -> bool {
        self.state.current_step() > 0
    }

    /// Whether the Next control is enabled.
    ///
    /// Disabled at the results view and on the last question while it is
    /// still unanswered; everywhere else Next is allowed, answered or not.
    pub fn can_go_next(&self) -> bool {
        let step = self.state.current_step();
        let n = self.question_count();
        if step >= n {
            return false;
        }
        step + 1 < n || self.state.answers()[step].is_answered()
    }

    /// Jump straight to `index`, clamped to the results view.
    ///
    /// Jumping to the current step changes nothing, so a pending advance
    /// still fires.
    pub fn jump_to(&mut self, index: usize) {
        let from = self.state.current_step();
        let index = index.min(self.question_count());
        if index == from {
            return;
        }
        self.pending = None;
        let direction = if index > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.state.set_step(index, direction);
        debug!(from, to = self.state.current_step(), "jumped");
    }

    /// Go to the results view regardless of how many questions are answered.
    pub fn submit(&mut self) {
        self.jump_to(self.question_count());
    }

    pub fn restart(&mut self) {
        self.pending = None;
        self.state.reset();
        debug!("restarted");
    }

    /// Apply the survey key bindings. Inert at the results view.
    ///
    /// Returns whether the key was bound and handled.
    pub fn handle_key(&mut self, key: KeyInput, now: Instant) -> bool {
        if self.is_result() {
            return false;
        }
        match SurveyAction::for_key(key) {
            Some(SurveyAction::Navigate(direction)) => {
                self.navigate(direction);
                true
            }
            Some(SurveyAction::Answer(choice)) => self.answer(choice, now),
            None => false,
        }
    }

    pub fn snapshot(&self) -> SurveySnapshot {
        SurveySnapshot {
            step: self.state.current_step(),
            question_count: self.question_count(),
            direction: self.state.direction(),
            answers: self.state.answers().to_vec(),
            scores: self.state.scores(),
            is_result: self.state.is_result(),
            question: self.current_question(),
            can_go_back: self.can_go_back(),
            can_go_next: self.can_go_next(),
            advance_pending: self.advance_pending(),
        }
    }
}
