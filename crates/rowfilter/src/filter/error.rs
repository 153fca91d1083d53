//! Error types for the filter parser and compiler.

use rowfilter_combinator::CombinatorError;
use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that make a filter query invalid.
///
/// Every variant means the same thing to a host: the query is invalid and
/// the previously applied filter should stay in effect. The variants only
/// differ in what they tell the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// There were no terms to compile.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// The query does not follow the filter grammar.
    #[error("invalid filter syntax: {query}")]
    Syntax {
        /// The rejected query.
        query: String,
    },

    /// A `:name` qualifier does not name a known column.
    #[error("unknown column '{name}'{}", did_you_mean(.suggestion))]
    UnknownColumn {
        /// The name as written in the query.
        name: String,
        /// The closest known column name, if any.
        suggestion: Option<String>,
    },

    /// A derived regular expression failed to compile.
    #[error("invalid pattern /{pattern}/: {message}")]
    InvalidPattern {
        /// The regular expression source.
        pattern: String,
        /// The message reported by the regex engine.
        message: String,
    },

    /// The grammar itself could not be built.
    #[error("grammar construction failed: {0}")]
    Grammar(#[from] CombinatorError),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(". Did you mean '{}'?", s),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates a syntax error.
    pub fn syntax(query: impl Into<String>) -> Self {
        FilterError::Syntax {
            query: query.into(),
        }
    }

    /// Creates an unknown column error.
    pub fn unknown_column(name: impl Into<String>, suggestion: Option<&str>) -> Self {
        FilterError::UnknownColumn {
            name: name.into(),
            suggestion: suggestion.map(str::to_string),
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl ToString) -> Self {
        FilterError::InvalidPattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if the error stems from the user's query text rather
    /// than from building the grammar.
    pub fn is_invalid_query(&self) -> bool {
        !matches!(self, FilterError::Grammar(_))
    }
}
