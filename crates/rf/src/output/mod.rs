//! Output formatting utilities for the rf CLI.
//!
//! This module provides functions for formatting data as text or JSON:
//!
//! - [`rows`] - Filter results (matching rows, counts, predicate explanations)
//! - [`columns`] - Column directory listings

mod columns;
mod rows;

pub use columns::{format_columns_json, format_columns_table};
pub use rows::{
    format_count_json, format_explain_json, format_explain_text, format_rows_json,
    format_rows_text, format_summary,
};
