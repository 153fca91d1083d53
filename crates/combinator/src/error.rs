//! Error types for combinator construction.

use thiserror::Error;

/// A specialized Result type for building combinators.
pub type CombinatorResult<T> = Result<T, CombinatorError>;

/// Errors raised while *building* a combinator.
///
/// Running a combinator never fails with an error; it yields
/// [`Match::NoMatch`](crate::Match::NoMatch) instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CombinatorError {
    /// The pattern handed to [`regex`](crate::regex) does not compile.
    #[error("invalid pattern /{pattern}/: {message}")]
    InvalidPattern {
        /// The pattern as written by the caller.
        pattern: String,
        /// The message reported by the regex engine.
        message: String,
    },

    /// The requested capture group does not exist in the pattern.
    #[error("pattern /{pattern}/ has no capture group {group}")]
    NoSuchGroup {
        /// The pattern as written by the caller.
        pattern: String,
        /// The requested group index.
        group: usize,
    },
}

impl CombinatorError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl ToString) -> Self {
        CombinatorError::InvalidPattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Creates a missing capture group error.
    pub fn no_such_group(pattern: impl Into<String>, group: usize) -> Self {
        CombinatorError::NoSuchGroup {
            pattern: pattern.into(),
            group,
        }
    }
}
