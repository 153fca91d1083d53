//! Composition operators.
//!
//! Each operator takes parsers by value and returns a new [`Parser`]; the
//! inputs are captured, never mutated. Alternatives always restart from the
//! original input, and a failed composite reports no partial progress.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use crate::parser::{call_description, Parser};
use crate::result::Match;

/// A labeled record produced by [`labeled`], keyed by field name.
pub type Record<T> = BTreeMap<String, T>;

/// Runs every parser in order, threading the remainder forward.
///
/// Fails as a whole if any element fails.
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    let description = call_description("sequence", parsers.iter().map(|p| p.description()));
    Parser::new(description, move |input| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut rest = input;
        for parser in &parsers {
            match parser.parse(rest) {
                Match::Matched(value, next) => {
                    values.push(value);
                    rest = next;
                }
                Match::NoMatch => return Match::NoMatch,
            }
        }
        Match::Matched(values, rest)
    })
}

/// Runs `first` then `second`, yielding both values.
pub fn pair<A: 'static, B: 'static>(first: Parser<A>, second: Parser<B>) -> Parser<(A, B)> {
    let description = call_description("pair", [first.description(), second.description()]);
    Parser::new(description, move |input| {
        let Match::Matched(a, rest) = first.parse(input) else {
            return Match::NoMatch;
        };
        match second.parse(rest) {
            Match::Matched(b, rest) => Match::Matched((a, b), rest),
            Match::NoMatch => Match::NoMatch,
        }
    })
}

/// Tries each parser against the same input and returns the first match.
pub fn alternation<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    let description = call_description("alternation", parsers.iter().map(|p| p.description()));
    Parser::new(description, move |input| {
        parsers
            .iter()
            .map(|parser| parser.parse(input))
            .find(Match::is_matched)
            .unwrap_or(Match::NoMatch)
    })
}

/// Applies `parser` repeatedly until it fails, collecting the values.
///
/// Always succeeds. An application that matches without consuming input
/// ends the repetition and its value is dropped, so a parser that can
/// match the empty string cannot loop forever.
pub fn zero_or_more<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let description = call_description("zero_or_more", [parser.description()]);
    Parser::new(description, move |input| {
        let (values, rest) = repeat(&parser, input);
        Match::Matched(values, rest)
    })
}

/// Like [`zero_or_more`], but fails unless `parser` matched at least `n` times.
pub fn at_least<T: 'static>(n: usize, parser: Parser<T>) -> Parser<Vec<T>> {
    let description = format!("at_least({}, {})", n, parser.description());
    Parser::new(description, move |input| {
        let (values, rest) = repeat(&parser, input);
        if values.len() >= n {
            Match::Matched(values, rest)
        } else {
            Match::NoMatch
        }
    })
}

/// Applies `parser` one or more times.
pub fn one_or_more<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let description = call_description("one_or_more", [parser.description()]);
    at_least(1, parser).with_description(description)
}

fn repeat<'a, T: 'static>(parser: &Parser<T>, input: &'a str) -> (Vec<T>, &'a str) {
    let mut values = Vec::new();
    let mut rest = input;
    while let Match::Matched(value, next) = parser.parse(rest) {
        if next.len() >= rest.len() {
            break;
        }
        values.push(value);
        rest = next;
    }
    (values, rest)
}

/// Yields `Some(value)` when `parser` matches, otherwise `None` without
/// consuming input.
pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    let description = call_description("optional", [parser.description()]);
    Parser::new(description, move |input| match parser.parse(input) {
        Match::Matched(value, rest) => Match::Matched(Some(value), rest),
        Match::NoMatch => Match::Matched(None, input),
    })
}

/// Turns the positional values of a sequence into a [`Record`] keyed by
/// `names`.
///
/// Fails if the sequence yields a different number of values than there
/// are names.
pub fn labeled<T: 'static>(names: &[&str], parser: Parser<Vec<T>>) -> Parser<Record<T>> {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let description = format!("labeled({:?}, {})", names, parser.description());
    Parser::new(description, move |input| {
        let Match::Matched(values, rest) = parser.parse(input) else {
            return Match::NoMatch;
        };
        if values.len() != names.len() {
            return Match::NoMatch;
        }
        Match::Matched(names.iter().cloned().zip(values).collect(), rest)
    })
}

/// Maps a successful value through `f`.
pub fn transform<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    let description = call_description("transform", [parser.description()]);
    Parser::new(description, move |input| parser.parse(input).map(&f))
}

/// Keeps a successful value only if `predicate` accepts it.
pub fn filter<T, F>(parser: Parser<T>, predicate: F) -> Parser<T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let description = call_description("filter", [parser.description()]);
    Parser::new(description, move |input| match parser.parse(input) {
        Match::Matched(value, rest) if predicate(&value) => Match::Matched(value, rest),
        _ => Match::NoMatch,
    })
}

/// Succeeds, consuming nothing, exactly when `parser` does not match.
pub fn negate_presence<T: 'static>(parser: Parser<T>) -> Parser<()> {
    let description = call_description("negate_presence", [parser.description()]);
    Parser::new(description, move |input| {
        if parser.parse(input).is_matched() {
            Match::NoMatch
        } else {
            Match::Matched((), input)
        }
    })
}

/// Requires every parser to match the same input; returns the last match.
///
/// An empty conjunction never matches.
pub fn conjunction<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    let description = call_description("conjunction", parsers.iter().map(|p| p.description()));
    Parser::new(description, move |input| {
        let mut last = Match::NoMatch;
        for parser in &parsers {
            last = parser.parse(input);
            if !last.is_matched() {
                return Match::NoMatch;
            }
        }
        last
    })
}

/// Requires `parser` to match and consume the entire input.
pub fn all<T: 'static>(parser: Parser<T>) -> Parser<T> {
    let description = call_description("all", [parser.description()]);
    Parser::new(description, move |input| match parser.parse(input) {
        m @ Match::Matched(..) if m.is_complete() => m,
        _ => Match::NoMatch,
    })
}

/// Converts a panic raised while running `parser` into `NoMatch`.
///
/// The fault is logged at WARN level through `tracing`. Use
/// [`Engine::fault_safe`](crate::Engine::fault_safe) to route it to an
/// injected [`Diagnostics`](crate::Diagnostics) instead.
pub fn fault_safe<T: 'static>(parser: Parser<T>) -> Parser<T> {
    let description = call_description("fault_safe", [parser.description()]);
    Parser::new(description, move |input| {
        catch_fault(&parser, input).unwrap_or_else(|message| {
            tracing::warn!(
                parser = parser.description(),
                input,
                "parser fault: {}",
                message
            );
            Match::NoMatch
        })
    })
}

/// Runs `parser`, returning the panic message if it panicked.
pub(crate) fn catch_fault<'a, T: 'static>(
    parser: &Parser<T>,
    input: &'a str,
) -> Result<Match<'a, T>, String> {
    panic::catch_unwind(AssertUnwindSafe(|| parser.parse(input))).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_string()
    }
}
