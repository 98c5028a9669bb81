//! Runtime error types

use std::fmt;

use thiserror::Error;

/// Which index was out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Question,
    Option,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Question => write!(f, "question"),
            IndexKind::Option => write!(f, "option"),
        }
    }
}

/// Core runtime error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Question or option index outside the quiz
    #[error("invalid {kind} index {index} (expected < {len})")]
    InvalidIndex {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    /// Operation needs an open lesson screen
    #[error("no lesson is open")]
    NoOpenLesson,
}

impl CoreError {
    pub fn invalid_question(index: usize, len: usize) -> Self {
        Self::InvalidIndex {
            kind: IndexKind::Question,
            index,
            len,
        }
    }

    pub fn invalid_option(index: usize, len: usize) -> Self {
        Self::InvalidIndex {
            kind: IndexKind::Option,
            index,
            len,
        }
    }
}
