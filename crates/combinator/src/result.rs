//! The value every combinator returns.

/// Outcome of running a parser against some input.
///
/// `Matched` carries the parsed value and the unconsumed remainder, which is
/// always a suffix of the input the parser was given. `NoMatch` carries
/// nothing: a parser that fails reports no partial progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Match<'a, T> {
    /// The parser succeeded with a value, leaving `remainder` unconsumed.
    Matched(T, &'a str),

    /// The parser did not match.
    NoMatch,
}

impl<'a, T> Match<'a, T> {
    /// Returns true if the parser succeeded.
    pub fn is_matched(&self) -> bool {
        matches!(self, Match::Matched(..))
    }

    /// Returns true if the parser succeeded and consumed all of its input.
    pub fn is_complete(&self) -> bool {
        matches!(self, Match::Matched(_, rest) if rest.is_empty())
    }

    /// Returns the parsed value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Match::Matched(value, _) => Some(value),
            Match::NoMatch => None,
        }
    }

    /// Consumes the match and returns the parsed value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Match::Matched(value, _) => Some(value),
            Match::NoMatch => None,
        }
    }

    /// Returns the unconsumed remainder, if the parser succeeded.
    pub fn remainder(&self) -> Option<&'a str> {
        match self {
            Match::Matched(_, rest) => Some(*rest),
            Match::NoMatch => None,
        }
    }

    /// Returns the span of `input` the parser consumed.
    ///
    /// `input` must be the string the parser was run against. Returns `None`
    /// on `NoMatch` or when the remainder is not a suffix of `input`.
    pub fn consumed(&self, input: &'a str) -> Option<&'a str> {
        let rest = self.remainder()?;
        if !input.ends_with(rest) {
            return None;
        }
        input.get(..input.len() - rest.len())
    }

    /// Converts the match into `Option<(value, remainder)>`.
    pub fn into_option(self) -> Option<(T, &'a str)> {
        match self {
            Match::Matched(value, rest) => Some((value, rest)),
            Match::NoMatch => None,
        }
    }

    /// Maps the parsed value, leaving the remainder untouched.
    pub fn map<U, F>(self, f: F) -> Match<'a, U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Match::Matched(value, rest) => Match::Matched(f(value), rest),
            Match::NoMatch => Match::NoMatch,
        }
    }
}
