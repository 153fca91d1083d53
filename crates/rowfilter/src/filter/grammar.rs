//! Combinator grammar for filter queries.
//!
//! # Grammar
//!
//! ```text
//! filter  ::= term+
//! term    ::= "NOT" column pattern
//!           | column "NOT"? pattern
//!           | "NOT"? pattern
//! column  ::= ":" name-word | ":" '"' name-quote '"'
//! pattern ::= quote | regex | word
//! ```
//!
//! Whitespace between tokens is skipped. Alternatives are tried in the
//! order written; the first that matches wins. A `NOT` that is not
//! followed by a pattern is itself a word, so `foo NOT` looks for `foo`
//! then `NOT`.

use std::sync::Arc;

use rowfilter_combinator::prelude::*;

use super::ast::{ParsedTerm, PatternKind};
use super::error::FilterResult;
use crate::directory::ColumnDirectory;

/// `:name` column qualifier; group 1 is the name.
pub const NAME_WORD_PATTERN: &str = r":([^\s:]+)";

/// `:"full name"` column qualifier; group 1 is the name.
pub const NAME_QUOTE_PATTERN: &str = r#":"([^"]+)""#;

/// `"quoted text"` with `\"` and `\\` escapes; group 1 is the raw body.
pub const QUOTE_PATTERN: &str = r#""((?:\\["\\]|[^"])*)""#;

/// `/regex/` with `\/` escapes; group 1 is the raw body.
pub const REGEX_PATTERN: &str = r"/((?:\\[/\\]|[^/])*)/";

/// A bare word: anything up to whitespace, `:`, `"` or `/`.
pub const WORD_PATTERN: &str = r#"[^:"/\s]+"#;

/// The `NOT` keyword.
pub const NOT_PATTERN: &str = r"NOT\b";

/// The filter grammar, bound to one column directory.
///
/// The grammar is immutable once built and can parse any number of
/// queries. Column names are checked against the directory while parsing:
/// an unknown `:name` fails the term, and so the whole query.
#[derive(Debug, Clone)]
pub struct Grammar {
    filter: Parser<Vec<ParsedTerm>>,
}

impl Grammar {
    /// Builds the grammar for `directory`.
    ///
    /// Parsers are passed through `engine`, so an engine with diagnostics
    /// enabled traces the column, pattern and term rules.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Grammar`](super::FilterError::Grammar) if a
    /// token pattern fails to compile.
    pub fn new(directory: Arc<ColumnDirectory>, engine: &Engine) -> FilterResult<Self> {
        let not = describe("not", trim(regex(NOT_PATTERN)?));

        let column = engine.trace(describe(
            "column",
            alternation(vec![
                known_column(NAME_QUOTE_PATTERN, Arc::clone(&directory))?,
                known_column(NAME_WORD_PATTERN, directory)?,
            ]),
        ));

        let quote = transform(trim(regex_capture(QUOTE_PATTERN, 1)?), |body| {
            (PatternKind::Quote, unescape_quote(&body))
        });
        let regex_body = transform(trim(regex_capture(REGEX_PATTERN, 1)?), |body| {
            (PatternKind::Regex, unescape_delimiter(&body))
        });
        let word = transform(trim(regex(WORD_PATTERN)?), |text| (PatternKind::Word, text));
        let pattern = engine.trace(describe(
            "pattern",
            alternation(vec![quote, regex_body, word]),
        ));

        // A NOT with no pattern after it is read as the word NOT.
        let negatable = alternation(vec![
            transform(pair(not.clone(), pattern.clone()), |(_, pattern)| (true, pattern)),
            transform(pattern.clone(), |pattern| (false, pattern)),
        ]);

        let negated_column_term = transform(
            pair(not, pair(column.clone(), pattern)),
            |(_, (column, (kind, text)))| ParsedTerm::in_column(column, kind, text).negated(),
        );
        let column_term = transform(
            pair(column, negatable.clone()),
            |(column, (negate, (kind, text)))| ParsedTerm {
                negate,
                ..ParsedTerm::in_column(column, kind, text)
            },
        );
        let bare_term = transform(negatable, |(negate, (kind, text))| ParsedTerm {
            negate,
            ..ParsedTerm::bare(kind, text)
        });

        let term = engine.trace(describe(
            "term",
            alternation(vec![negated_column_term, column_term, bare_term]),
        ));

        let filter = engine.fault_safe(describe("filter", all(one_or_more(term))));

        Ok(Self { filter })
    }

    /// Parses `query` into its terms, or `None` if it does not follow the
    /// grammar. An empty query is not a valid filter.
    pub fn parse(&self, query: &str) -> Option<Vec<ParsedTerm>> {
        self.filter.parse(query).into_value()
    }

    /// Returns the underlying combinator.
    pub fn parser(&self) -> &Parser<Vec<ParsedTerm>> {
        &self.filter
    }
}

/// A column qualifier that only matches names the directory resolves.
fn known_column(pattern: &str, directory: Arc<ColumnDirectory>) -> FilterResult<Parser<String>> {
    let name = trim(regex_capture(pattern, 1)?);
    Ok(filter(name, move |name: &String| {
        directory.resolve(name).is_some()
    }))
}

/// Removes the `\"` and `\\` escapes from a quoted body. Other backslashes
/// are kept as written.
pub(crate) fn unescape_quote(body: &str) -> String {
    unescape(body, &['"', '\\'])
}

/// Removes `\/` escapes from a regex body, leaving every other escape for
/// the regex engine.
pub(crate) fn unescape_delimiter(body: &str) -> String {
    unescape(body, &['/'])
}

fn unescape(body: &str, escapable: &[char]) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if escapable.contains(&next) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
