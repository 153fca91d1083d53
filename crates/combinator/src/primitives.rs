//! Leaf parsers: literals, regexes, end of input, whitespace trimming.

use regex::Regex;

use crate::error::{CombinatorError, CombinatorResult};
use crate::parser::Parser;
use crate::result::Match;

/// Matches `text` exactly at the start of the input.
pub fn literal(text: impl Into<String>) -> Parser<String> {
    let text: String = text.into();
    let description = format!("literal({:?})", text);
    Parser::new(description, move |input| match input.strip_prefix(text.as_str()) {
        Some(rest) => Match::Matched(text.clone(), rest),
        None => Match::NoMatch,
    })
}

/// Matches `pattern` anchored at the start of the input, yielding the whole
/// matched text.
///
/// # Errors
///
/// Returns [`CombinatorError::InvalidPattern`] if `pattern` does not compile.
pub fn regex(pattern: &str) -> CombinatorResult<Parser<String>> {
    let re = anchored(pattern)?;
    let description = format!("regex(/{}/)", pattern);
    Ok(Parser::new(description, move |input| match re.find(input) {
        Some(m) => Match::Matched(m.as_str().to_string(), &input[m.end()..]),
        None => Match::NoMatch,
    }))
}

/// Matches `pattern` anchored at the start of the input, yielding the text
/// of capture group `group`.
///
/// The whole match is still consumed. A group that exists but did not take
/// part in the match yields an empty string.
///
/// # Errors
///
/// Returns [`CombinatorError::InvalidPattern`] if `pattern` does not compile,
/// or [`CombinatorError::NoSuchGroup`] if it has fewer than `group` groups.
pub fn regex_capture(pattern: &str, group: usize) -> CombinatorResult<Parser<String>> {
    let re = anchored(pattern)?;
    // The anchoring wrapper is non-capturing, so group numbers are unchanged.
    if group >= re.captures_len() {
        return Err(CombinatorError::no_such_group(pattern, group));
    }
    let description = format!("regex(/{}/, {})", pattern, group);
    Ok(Parser::new(description, move |input| {
        let Some(caps) = re.captures(input) else {
            return Match::NoMatch;
        };
        let end = caps.get(0).map_or(0, |m| m.end());
        let value = caps.get(group).map_or("", |m| m.as_str());
        Match::Matched(value.to_string(), &input[end..])
    }))
}

/// Succeeds with `()` only when the input is empty.
pub fn end_of_input() -> Parser<()> {
    Parser::new("end_of_input()", |input| {
        if input.is_empty() {
            Match::Matched((), input)
        } else {
            Match::NoMatch
        }
    })
}

/// Runs `parser` with leading whitespace skipped, then skips leading
/// whitespace in its remainder.
///
/// Only leading whitespace is ever skipped, so the remainder stays a
/// suffix of the original input.
pub fn trim<T: 'static>(parser: Parser<T>) -> Parser<T> {
    let description = format!("trim({})", parser.description());
    Parser::new(description, move |input| {
        match parser.parse(input.trim_start()) {
            Match::Matched(value, rest) => Match::Matched(value, rest.trim_start()),
            Match::NoMatch => Match::NoMatch,
        }
    })
}

fn anchored(pattern: &str) -> CombinatorResult<Regex> {
    Regex::new(&format!("^(?:{})", pattern))
        .map_err(|e| CombinatorError::invalid_pattern(pattern, e))
}
