//! # Quiz Session
//!
//! One attempt at a subject's quiz: a shuffled copy of the bank, a cursor and
//! a score.
//!
//! ```text
//! NotStarted ──start()──▶ InProgress ──submit_answer() × N──▶ Finished
//!                          cursor 0..N                        result()
//! ```
//!
//! The permutation is computed once in `start()`. The session owns its copy of
//! the questions, so nothing done here touches the catalog's canonical order.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::catalog::{Question, Subject};

/// Minimum percentage for the top tier.
pub const TOP_TIER_PERCENT: u32 = 80;
/// Minimum percentage for the middle tier.
pub const MIDDLE_TIER_PERCENT: u32 = 60;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The subject has no questions to ask.
    EmptyQuiz(String),
    /// The operation is not valid in the session's current phase.
    InvalidState(&'static str),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::EmptyQuiz(subject) => write!(f, "no quiz questions for {subject}"),
            QuizError::InvalidState(msg) => write!(f, "invalid quiz state: {msg}"),
        }
    }
}

impl std::error::Error for QuizError {}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Finished,
}

/// Qualitative score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Top,
    Middle,
    Bottom,
}

impl Tier {
    /// Bands over the exact ratio `score / total`, so a 79.6% score stays
    /// in the middle tier even though it displays as 80%.
    pub fn from_score(score: usize, total: usize) -> Self {
        let scaled = score * 100;
        if scaled >= TOP_TIER_PERCENT as usize * total {
            Tier::Top
        } else if scaled >= MIDDLE_TIER_PERCENT as usize * total {
            Tier::Middle
        } else {
            Tier::Bottom
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            Tier::Top => "Excellent job! You really know your stuff!",
            Tier::Middle => "Good effort! Keep learning and improving!",
            Tier::Bottom => "Keep studying! You'll get better with practice.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub subject: String,
    pub score: usize,
    pub total: usize,
    /// `round(100 * score / total)`, halves rounded up.
    pub percentage: u32,
    pub tier: Tier,
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    /// True once the last question has been answered.
    pub finished: bool,
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone)]
pub struct QuizSession {
    subject: String,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
}

impl QuizSession {
    /// Start a session over a random permutation of the subject's bank.
    pub fn start(subject: &Subject) -> Result<Self, QuizError> {
        Self::start_with_rng(subject, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        subject: &Subject,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        if subject.quiz.is_empty() {
            return Err(QuizError::EmptyQuiz(subject.name.clone()));
        }

        let mut questions = subject.quiz.clone();
        questions.shuffle(rng);

        Ok(Self {
            subject: subject.name.clone(),
            questions,
            current_index: 0,
            score: 0,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// The session's question order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn phase(&self) -> QuizPhase {
        if self.current_index >= self.questions.len() {
            QuizPhase::Finished
        } else {
            QuizPhase::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == QuizPhase::Finished
    }

    /// `(question number starting at 1, total)` for the question on screen.
    pub fn progress(&self) -> (usize, usize) {
        let shown = (self.current_index + 1).min(self.questions.len());
        (shown, self.questions.len())
    }

    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.questions
            .get(self.current_index)
            .ok_or(QuizError::InvalidState("no current question after the last one"))
    }

    /// Grade `selected` against the current question and advance.
    ///
    /// Not idempotent: each call consumes one question.
    pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerOutcome, QuizError> {
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(QuizError::InvalidState("answer submitted after the quiz finished"))?;

        let correct = selected == question.correct_answer();
        let correct_answer = question.correct_answer().to_string();

        if correct {
            self.score += 1;
        }
        self.current_index += 1;

        Ok(AnswerOutcome {
            correct,
            correct_answer,
            finished: self.is_finished(),
        })
    }

    pub fn result(&self) -> Result<QuizResult, QuizError> {
        if !self.is_finished() {
            return Err(QuizError::InvalidState("result requested before the quiz finished"));
        }

        let total = self.questions.len();
        Ok(QuizResult {
            subject: self.subject.clone(),
            score: self.score,
            total,
            percentage: percentage(self.score, total),
            tier: Tier::from_score(self.score, total),
        })
    }
}

/// `round(100 * score / total)` in integer arithmetic.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * score + total) / (2 * total)) as u32
}
