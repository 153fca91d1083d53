//! Injectable diagnostics for the combinator engine.
//!
//! Diagnostics are chosen once, when an [`Engine`] is built. A disabled
//! engine hands parsers back untouched, so tracing costs nothing on the hot
//! path unless it was asked for.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::compose::catch_fault;
use crate::parser::{call_description, Parser};
use crate::result::Match;

/// How a traced parser finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// The parser matched, leaving `remainder`.
    Matched {
        /// The unconsumed input.
        remainder: &'a str,
    },
    /// The parser did not match.
    NoMatch,
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Matched { remainder } => write!(f, "matched, rest {:?}", remainder),
            Outcome::NoMatch => f.write_str("no match"),
        }
    }
}

/// Receiver of parser trace and fault events.
///
/// Every method has a no-op default, so an implementation only overrides
/// what it cares about.
pub trait Diagnostics: fmt::Debug + Send + Sync {
    /// Whether parsers passed through [`Engine::trace`] should be wrapped.
    fn enabled(&self) -> bool {
        false
    }

    /// Called before a traced parser runs.
    fn enter(&self, _parser: &str, _input: &str) {}

    /// Called after a traced parser returns.
    fn exit(&self, _parser: &str, _input: &str, _outcome: Outcome<'_>) {}

    /// Called when a fault-safe parser caught a panic.
    fn fault(&self, _parser: &str, _input: &str, _message: &str) {}
}

/// Diagnostics that record nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Silent {}

/// Diagnostics that emit `tracing` events.
///
/// Trace events are logged at TRACE level under the `rowfilter::parser`
/// target, faults at WARN.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn enabled(&self) -> bool {
        true
    }

    fn enter(&self, parser: &str, input: &str) {
        tracing::trace!(target: "rowfilter::parser", parser, input, "enter");
    }

    fn exit(&self, parser: &str, input: &str, outcome: Outcome<'_>) {
        tracing::trace!(target: "rowfilter::parser", parser, input, %outcome, "exit");
    }

    fn fault(&self, parser: &str, input: &str, message: &str) {
        tracing::warn!(target: "rowfilter::parser", parser, input, "parser fault: {}", message);
    }
}

/// Diagnostics that keep every event in memory, one line per event.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events recorded so far.
    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: String) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn enabled(&self) -> bool {
        true
    }

    fn enter(&self, parser: &str, input: &str) {
        self.record(format!("enter {} {:?}", parser, input));
    }

    fn exit(&self, parser: &str, input: &str, outcome: Outcome<'_>) {
        self.record(format!("exit {} {:?} => {}", parser, input, outcome));
    }

    fn fault(&self, parser: &str, input: &str, message: &str) {
        self.record(format!("fault {} {:?}: {}", parser, input, message));
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for Arc<D> {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn enter(&self, parser: &str, input: &str) {
        (**self).enter(parser, input)
    }

    fn exit(&self, parser: &str, input: &str, outcome: Outcome<'_>) {
        (**self).exit(parser, input, outcome)
    }

    fn fault(&self, parser: &str, input: &str, message: &str) {
        (**self).fault(parser, input, message)
    }
}

/// Builds instrumented parsers around an injected [`Diagnostics`].
///
/// # Example
///
/// ```
/// use rowfilter_combinator::{literal, Engine, TracingDiagnostics};
///
/// let quiet = Engine::new();
/// let p = quiet.trace(literal("a"));
/// assert_eq!(p.description(), "literal(\"a\")");
///
/// let loud = Engine::with_diagnostics(TracingDiagnostics);
/// let p = loud.trace(literal("a"));
/// assert_eq!(p.description(), "trace(literal(\"a\"))");
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with diagnostics disabled.
    pub fn new() -> Self {
        Self {
            diagnostics: Arc::new(Silent),
        }
    }

    /// Creates an engine reporting to `diagnostics`.
    pub fn with_diagnostics(diagnostics: impl Diagnostics + 'static) -> Self {
        Self {
            diagnostics: Arc::new(diagnostics),
        }
    }

    /// Returns the injected diagnostics.
    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Returns true if [`trace`](Self::trace) wraps parsers.
    pub fn is_tracing(&self) -> bool {
        self.diagnostics.enabled()
    }

    /// Wraps `parser` so entry and exit are reported to the diagnostics.
    ///
    /// Returns `parser` itself when diagnostics are disabled.
    pub fn trace<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        if !self.diagnostics.enabled() {
            return parser;
        }
        let diagnostics = Arc::clone(&self.diagnostics);
        let description = call_description("trace", [parser.description()]);
        Parser::new(description, move |input| {
            diagnostics.enter(parser.description(), input);
            let result = parser.parse(input);
            let outcome = match &result {
                Match::Matched(_, rest) => Outcome::Matched { remainder: *rest },
                Match::NoMatch => Outcome::NoMatch,
            };
            diagnostics.exit(parser.description(), input, outcome);
            result
        })
    }

    /// Converts a panic raised while running `parser` into `NoMatch`,
    /// reporting it to the diagnostics.
    pub fn fault_safe<T: 'static>(&self, parser: Parser<T>) -> Parser<T> {
        let diagnostics = Arc::clone(&self.diagnostics);
        let description = call_description("fault_safe", [parser.description()]);
        Parser::new(description, move |input| {
            catch_fault(&parser, input).unwrap_or_else(|message| {
                diagnostics.fault(parser.description(), input, &message);
                Match::NoMatch
            })
        })
    }
}
