//! Parser combinators over `&str`.
//!
//! Every combinator is a [`Parser<T>`]: a pure function from the remaining
//! input to a [`Match`], which is either `Matched(value, remainder)` or
//! `NoMatch`. The remainder is always a suffix of the input handed to the
//! parser, so combinators only ever narrow the input.
//!
//! # Example
//!
//! ```
//! use rowfilter_combinator::prelude::*;
//!
//! let key_value = labeled(
//!     &["key", "value"],
//!     sequence(vec![
//!         trim(regex("[a-z]+").unwrap()),
//!         trim(regex(r"\d+").unwrap()),
//!     ]),
//! );
//! let pairs = all(one_or_more(key_value));
//!
//! let m = pairs.parse(" abc 123 xyz 45 ");
//! let records = m.into_value().unwrap();
//! assert_eq!(records[1]["key"], "xyz");
//! assert_eq!(records[1]["value"], "45");
//! ```
//!
//! Failure is a value: nothing in this crate panics on malformed input. A
//! parser built from user code can still panic, which is what
//! [`fault_safe`] and [`Engine::fault_safe`] are for.

mod compose;
mod diagnostics;
mod error;
mod parser;
pub mod prelude;
mod primitives;
mod result;

pub use compose::{
    all, alternation, at_least, conjunction, fault_safe, filter, labeled, negate_presence,
    one_or_more, optional, pair, sequence, transform, zero_or_more, Record,
};
pub use diagnostics::{Diagnostics, Engine, Outcome, RecordingDiagnostics, Silent, TracingDiagnostics};
pub use error::{CombinatorError, CombinatorResult};
pub use parser::{describe, Parser};
pub use primitives::{end_of_input, literal, regex, regex_capture, trim};
pub use result::Match;
