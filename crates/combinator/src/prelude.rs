//! Convenience re-exports for building grammars.
//!
//! ```
//! use rowfilter_combinator::prelude::*;
//! ```

pub use crate::compose::{
    all, alternation, at_least, conjunction, fault_safe, filter, labeled, negate_presence,
    one_or_more, optional, pair, sequence, transform, zero_or_more, Record,
};
pub use crate::diagnostics::{Diagnostics, Engine, Silent, TracingDiagnostics};
pub use crate::error::{CombinatorError, CombinatorResult};
pub use crate::parser::{describe, Parser};
pub use crate::primitives::{end_of_input, literal, regex, regex_capture, trim};
pub use crate::result::Match;
