//! Calculator core: operand text, the evaluator and the entry state machine
//!
//! Operands travel between actions as [`EntryText`] and are only turned into
//! `f64` inside [`evaluator`].

pub mod evaluator;
mod operations;
pub mod session;

pub use operations::{Action, ActionKind, Operator, OperatorLabels, StandardLabels};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Evaluation failures. Both are display-only: the session renders them as
/// error tokens and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// An operand could not be read as a decimal number
    #[error("invalid operand: {operand:?}")]
    Parse {
        /// The offending operand text
        operand: String,
    },
    /// Divisor was exactly zero
    #[error("division by zero")]
    DivisionByZero,
}

impl CalcError {
    /// Creates a parse error for the given operand text
    #[must_use]
    pub fn parse(operand: impl Into<String>) -> Self {
        Self::Parse {
            operand: operand.into(),
        }
    }
}

/// Operand text as typed or as produced by a previous result.
///
/// Kept as a string so partial input such as `"12."` redisplays exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryText(String);

impl EntryText {
    /// Creates an empty entry
    #[must_use]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Returns the text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the entry already holds a decimal point
    #[must_use]
    pub fn has_decimal_point(&self) -> bool {
        self.0.contains('.')
    }

    /// Appends typed input
    pub fn push_str(&mut self, input: &str) {
        self.0.push_str(input);
    }

    /// Replaces the whole entry
    pub fn replace(&mut self, input: &str) {
        self.0.clear();
        self.0.push_str(input);
    }

    /// Removes the last character, if any
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    /// Clears the entry
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl std::fmt::Display for EntryText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for EntryText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl AsRef<str> for EntryText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
