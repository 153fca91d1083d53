//! Row filtering for tabular data.
//!
//! A small query language (`:age "30" NOT /^draft/`) is parsed with the
//! combinators from [`rowfilter_combinator`] and compiled into a single
//! predicate over a row's column text.
//!
//! The pieces, leaves first:
//!
//! - [`ColumnDirectory`] maps column names and declared indices to row-data
//!   offsets. It is built once per table by the host.
//! - [`filter::FilterCompiler`] parses a query into
//!   [`ParsedTerm`](filter::ParsedTerm)s and compiles them into a
//!   [`CompiledFilter`](filter::CompiledFilter).
//! - [`rows::RowEvaluator`] applies a compiled filter to a batch of rows,
//!   caching each row's normalized text.
//! - [`session::FilterSession`] keeps the last valid filter in effect while
//!   the user edits the query.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rowfilter_rs::filter::FilterCompiler;
//! use rowfilter_rs::rows::RowData;
//! use rowfilter_rs::ColumnDirectory;
//!
//! let directory = Arc::new(ColumnDirectory::from_names(["name", "age"]).unwrap());
//! let compiler = FilterCompiler::new(Arc::clone(&directory)).unwrap();
//!
//! let filter = compiler.compile(r#":age "30" NOT /^draft/"#).unwrap();
//! assert!(filter.matches(&RowData::from_cells(["alice", "30"])));
//! assert!(!filter.matches(&RowData::from_cells(["alice", "130"])));
//! assert!(!filter.matches(&RowData::from_cells(["draft bob", "30"])));
//! ```

pub mod directory;
pub mod filter;
pub mod help;
pub mod rows;
pub mod session;

pub use directory::{Column, ColumnDirectory, DirectoryBuilder, DirectoryError};
pub use filter::{CompiledFilter, FilterCompiler, FilterError, FilterResult};
pub use rows::{Evaluation, RowData, RowEvaluator, RowSource};
pub use session::{FilterSession, QueryStatus};
