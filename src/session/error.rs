use thiserror::Error;

use super::SessionState;

/// Which party is expected to act on a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user can fix it, e.g. by picking an option.
    Input,
    /// The loaded document is incomplete for this question.
    Data,
    /// The caller drove the state machine out of order.
    Misuse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please select an answer.")]
    NoSelection,

    #[error("question {question} has no answer key in this document")]
    MissingAnswerKey { question: usize },

    #[error("cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("question {question} was already checked")]
    AlreadySubmitted { question: usize },

    #[error("question {question} has not been checked yet")]
    NotSubmitted { question: usize },
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::NoSelection => ErrorKind::Input,
            SessionError::MissingAnswerKey { .. } => ErrorKind::Data,
            SessionError::InvalidState { .. }
            | SessionError::AlreadySubmitted { .. }
            | SessionError::NotSubmitted { .. } => ErrorKind::Misuse,
        }
    }
}
