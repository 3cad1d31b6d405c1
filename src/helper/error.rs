//! Simple error types and helpers for consistent error handling.
//!
//! It uses the thiserror crate to reduce boilerplate.
use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QmError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Invalid term \"{0}\": expected a string of '0', '1' and '-'")]
    InvalidTerm(String),

    #[error("Too many variables: found {found}, at most {max} are supported")]
    TooManyVariables { found: usize, max: usize },

    #[error("Invalid width {width}: expected a value between 1 and {max}")]
    InvalidWidth { width: usize, max: usize },

    #[error("Minterm {minterm} does not fit in {width} variables")]
    WidthMismatch { minterm: u64, width: usize },

    #[error("Incomplete cover: no implicant left for minterms {}", .uncovered.join(", "))]
    IncompleteCover { uncovered: Vec<String> },

    #[error("No function was provided")]
    MissingFunction(),

    #[error(transparent)]
    Generic(#[from] GenericError),
}

#[derive(Error, Debug)]
pub struct GenericError {
    s: String,
}

impl GenericError {
    pub fn new(s: String) -> Self {
        GenericError { s }
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.s)
    }
}

pub type QmResult<T> = Result<T, QmError>;

pub type EmptyQmResult = QmResult<()>;

impl<R: pest::RuleType + 'static> From<pest::error::Error<R>> for QmError {
    fn from(e: pest::error::Error<R>) -> Self {
        QmError::Syntax(e.to_string())
    }
}

pub fn generic_error(s: String) -> QmError {
    QmError::Generic(GenericError::new(s))
}
