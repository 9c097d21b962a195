//! Exam session state machine.
//!
//! ```text
//! Empty --start--> InProgress --advance past last--> Finished
//!   ^                                                   |
//!   +----------------------- restart -------------------+
//! ```

mod error;

use std::fmt;

use tracing::{info, warn};

pub use error::{ErrorKind, SessionError};

use crate::document::{ExamItem, ParsedDocument, pair_by_position};
use crate::grading::Report;
use crate::models::{AnswerKey, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    InProgress,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Empty => "empty",
            SessionState::InProgress => "in progress",
            SessionState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Result of checking a submitted letter against the answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct {
        explanation: String,
    },
    Incorrect {
        /// Correct letter, uppercased for display.
        correct: char,
        explanation: String,
    },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }

    pub fn explanation(&self) -> &str {
        match self {
            Verdict::Correct { explanation } | Verdict::Incorrect { explanation, .. } => {
                explanation
            }
        }
    }
}

/// How a question ended up once it was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    NoAnswerKey,
}

/// The question under the cursor, with display progress.
#[derive(Debug, Clone, Copy)]
pub struct CurrentQuestion<'a> {
    pub question: &'a Question,
    /// 1-based position.
    pub number: usize,
    pub total: usize,
    /// `number / total`, in `(0, 1]`.
    pub progress: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Visit {
    #[default]
    Pending,
    Judged(Verdict),
    Unkeyed,
}

#[derive(Debug, Default)]
pub struct Session {
    items: Vec<ExamItem>,
    state: SessionState,
    current_index: usize,
    score: usize,
    visit: Visit,
    outcomes: Vec<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from separately parsed questions and answers.
    pub fn start(&mut self, questions: Vec<Question>, answers: Vec<AnswerKey>) {
        self.start_document(ParsedDocument { questions, answers });
    }

    pub fn start_document(&mut self, document: ParsedDocument) {
        self.start_items(pair_by_position(document));
    }

    /// Starts a session over already paired items.
    ///
    /// Callers should not start on zero items; if they do the session is
    /// finished immediately.
    pub fn start_items(&mut self, items: Vec<ExamItem>) {
        if items.is_empty() {
            warn!("starting a session with no questions");
        }

        self.state = if items.is_empty() {
            SessionState::Finished
        } else {
            SessionState::InProgress
        };
        self.outcomes = Vec::with_capacity(items.len());
        self.items = items;
        self.current_index = 0;
        self.score = 0;
        self.visit = Visit::Pending;

        info!(questions = self.items.len(), "exam session started");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn items(&self) -> &[ExamItem] {
        &self.items
    }

    /// Outcomes of the questions checked so far, in order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// True once the current question has been checked in this visit.
    pub fn is_checked(&self) -> bool {
        self.state == SessionState::InProgress && self.visit != Visit::Pending
    }

    /// Verdict for the current question, once it has been judged.
    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.visit {
            Visit::Judged(verdict) if self.state == SessionState::InProgress => Some(verdict),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Result<CurrentQuestion<'_>, SessionError> {
        self.expect_state("current_question", SessionState::InProgress)?;

        let total = self.items.len();
        let number = self.current_index + 1;
        Ok(CurrentQuestion {
            question: &self.items[self.current_index].question,
            number,
            total,
            progress: number as f64 / total as f64,
        })
    }

    /// Checks `selection` against the current question's answer key.
    ///
    /// A missing selection leaves the session untouched. A missing answer
    /// key closes the question without scoring it, so the caller can still
    /// advance.
    pub fn submit(&mut self, selection: Option<char>) -> Result<Verdict, SessionError> {
        self.expect_state("submit", SessionState::InProgress)?;
        let question = self.current_index + 1;
        if self.visit != Visit::Pending {
            return Err(SessionError::AlreadySubmitted { question });
        }

        let selected = selection.ok_or(SessionError::NoSelection)?;

        let Some(key) = self.items[self.current_index].answer.as_ref() else {
            warn!(question, "no answer key for question");
            self.visit = Visit::Unkeyed;
            self.outcomes.push(Outcome::NoAnswerKey);
            return Err(SessionError::MissingAnswerKey { question });
        };

        let verdict = if selected.eq_ignore_ascii_case(&key.correct) {
            self.score += 1;
            Verdict::Correct {
                explanation: key.explanation.clone(),
            }
        } else {
            Verdict::Incorrect {
                correct: key.correct.to_ascii_uppercase(),
                explanation: key.explanation.clone(),
            }
        };

        self.outcomes.push(if verdict.is_correct() {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        });
        self.visit = Visit::Judged(verdict.clone());
        Ok(verdict)
    }

    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.expect_state("advance", SessionState::InProgress)?;
        if self.visit == Visit::Pending {
            return Err(SessionError::NotSubmitted {
                question: self.current_index + 1,
            });
        }

        self.current_index += 1;
        self.visit = Visit::Pending;

        if self.current_index >= self.items.len() {
            self.state = SessionState::Finished;
            info!(score = self.score, total = self.items.len(), "exam finished");
        }
        Ok(())
    }

    pub fn report(&self) -> Result<Report, SessionError> {
        self.expect_state("report", SessionState::Finished)?;
        Ok(Report::new(self.score, self.items.len()))
    }

    pub fn restart(&mut self) {
        *self = Self::default();
        info!("exam session reset");
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: SessionState,
    ) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
