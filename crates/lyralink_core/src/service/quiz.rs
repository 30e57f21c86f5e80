//! Quiz questions and the scoring flow over them.

use super::log_rejected;
use crate::clock::Clock;
use crate::gate::GatePass;
use crate::kv::KeyValueStore;
use crate::list::{PersistedList, Placement};
use crate::model::quiz::{QuizDraft, QuizQuestion};
use crate::model::RecordId;

pub const PERFECT_SCORE_MESSAGE: &str = "You know me perfectly, Lyraa. You are my soul's mirror.";
pub const PARTIAL_SCORE_MESSAGE: &str = "Every day is a new chance to learn more about our world.";

/// Stored questions in quiz order.
pub struct QuizBook<S: KeyValueStore, C: Clock> {
    list: PersistedList<QuizQuestion, S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> QuizBook<S, C> {
    pub fn open(store: S, clock: C) -> Self {
        Self {
            list: PersistedList::open(store),
            clock,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        self.list.records()
    }

    /// Appends a question to the end of the quiz.
    pub fn add(&mut self, draft: &QuizDraft) -> Option<RecordId> {
        let id = self.list.fresh_id();
        match QuizQuestion::from_draft(draft, id, self.clock.now()) {
            Ok(question) => Some(self.list.insert(question, Placement::Back)),
            Err(err) => {
                log_rejected("quiz", &err);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str, pass: &GatePass) -> bool {
        self.list.remove(id, pass)
    }
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

/// Progress through one run of the quiz. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    step: usize,
    score: usize,
    finished: bool,
    feedback: Option<Feedback>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn current<'q>(&self, questions: &'q [QuizQuestion]) -> Option<&'q QuizQuestion> {
        if self.finished {
            return None;
        }
        questions.get(self.step)
    }

    /// Scores `option` against the current question.
    ///
    /// Ignored once feedback is showing, so a question is scored at most once.
    pub fn answer(&mut self, questions: &[QuizQuestion], option: &str) -> Option<&Feedback> {
        if self.feedback.is_some() {
            return None;
        }
        let question = self.current(questions)?;
        let correct = question.is_correct(option);
        let message = question.context.clone();
        if correct {
            self.score += 1;
        }
        self.feedback = Some(Feedback { correct, message });
        self.feedback.as_ref()
    }

    /// Dismisses feedback and moves on, finishing after the last question.
    pub fn next(&mut self, total: usize) {
        self.feedback = None;
        if self.step + 1 < total {
            self.step += 1;
        } else {
            self.finished = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Keeps `step` in range after a question was deleted.
    pub fn on_question_removed(&mut self, remaining: usize) {
        if self.step >= remaining {
            self.step = remaining.saturating_sub(1);
        }
        self.feedback = None;
    }

    /// Score as a percentage of `total`, for the sync index ring.
    pub fn percentage(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        let percent = (self.score as f64 / total as f64 * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }

    pub fn result_message(&self, total: usize) -> &'static str {
        if total > 0 && self.score == total {
            PERFECT_SCORE_MESSAGE
        } else {
            PARTIAL_SCORE_MESSAGE
        }
    }
}
