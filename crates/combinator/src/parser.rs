//! The boxed combinator type.

use std::fmt;
use std::sync::Arc;

use crate::result::Match;

type ParseFn<T> = dyn for<'a> Fn(&'a str) -> Match<'a, T> + Send + Sync;

/// A composable parser producing values of type `T`.
///
/// A `Parser` is an immutable function from input to [`Match`] plus a
/// human-readable description. Cloning is cheap (two reference-count bumps)
/// and parsers can be shared freely across threads; running one never
/// mutates anything.
pub struct Parser<T> {
    run: Arc<ParseFn<T>>,
    description: Arc<str>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
            description: Arc::clone(&self.description),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<T: 'static> Parser<T> {
    /// Wraps a parsing function.
    ///
    /// The function must return a remainder that is a suffix of its input.
    pub fn new<F>(description: impl Into<Arc<str>>, run: F) -> Self
    where
        F: for<'a> Fn(&'a str) -> Match<'a, T> + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(run),
            description: description.into(),
        }
    }

    /// Runs the parser against `input`.
    pub fn parse<'a>(&self, input: &'a str) -> Match<'a, T> {
        (self.run)(input)
    }

    /// Returns the diagnostic description of this parser.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the same parser under a new description.
    pub fn with_description(self, description: impl Into<Arc<str>>) -> Self {
        Self {
            run: self.run,
            description: description.into(),
        }
    }
}

/// Relabels `parser` with `description`.
///
/// Grammars use this to give composite rules readable names, e.g.
/// `describe("column", alternation(...))`.
pub fn describe<T: 'static>(description: impl Into<Arc<str>>, parser: Parser<T>) -> Parser<T> {
    parser.with_description(description)
}

/// Renders `name(a, b, ...)` from the descriptions of `parts`.
pub(crate) fn call_description<'p>(
    name: &str,
    parts: impl IntoIterator<Item = &'p str>,
) -> String {
    let args: Vec<&str> = parts.into_iter().collect();
    format!("{}({})", name, args.join(", "))
}
