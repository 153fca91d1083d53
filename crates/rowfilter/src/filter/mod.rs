//! Filter query parser and compiler.
//!
//! # Supported Syntax
//!
//! ## Patterns
//! - `word` - Substring match anywhere in the row
//! - `"exact phrase"` - Literal substring, or exact value when column-qualified
//! - `/regex/` - Raw regular expression match
//!
//! ## Column Scoping
//! - `:name pattern` - Restrict the pattern to one column
//! - `:"multi word name" pattern` - Same, for names with spaces
//! - `:3 pattern` - Column by declared index
//!
//! ## Negation
//! - `NOT pattern` - Negate a single term (case-sensitive keyword)
//!
//! ## Combination
//! All terms must match. Bare terms (no column) must appear in the row in
//! the order written: `foo bar` matches `foo ... bar` but not `bar ... foo`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rowfilter_rs::filter::{FilterCompiler, PatternKind};
//! use rowfilter_rs::ColumnDirectory;
//!
//! let directory = Arc::new(ColumnDirectory::from_names(["title", "state"]).unwrap());
//! let compiler = FilterCompiler::new(directory).unwrap();
//!
//! let terms = compiler.parse(r#":state "open" fix"#).unwrap();
//! assert_eq!(terms[0].column.as_deref(), Some("state"));
//! assert_eq!(terms[0].kind, PatternKind::Quote);
//! assert_eq!(terms[1].column, None);
//! ```

mod ast;
mod compiler;
mod error;
mod grammar;

pub use ast::{CompiledFilter, CompiledPredicate, CompiledTerm, Extractor, ParsedTerm, PatternKind};
pub use compiler::FilterCompiler;
pub use error::{FilterError, FilterResult};
pub use grammar::{
    Grammar, NAME_QUOTE_PATTERN, NAME_WORD_PATTERN, NOT_PATTERN, QUOTE_PATTERN, REGEX_PATTERN,
    WORD_PATTERN,
};
