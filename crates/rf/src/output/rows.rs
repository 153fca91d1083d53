//! Filter result output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use rowfilter_rs::filter::ParsedTerm;
use rowfilter_rs::{ColumnDirectory, CompiledFilter, Evaluation};

use crate::table::Table;

/// JSON output structure for the filter command.
#[derive(Serialize)]
pub struct FilterOutput<'a> {
    pub query: &'a str,
    pub predicate: String,
    pub matched: usize,
    pub total: usize,
    pub columns: Vec<&'a str>,
    pub rows: Vec<RowOutput<'a>>,
}

/// JSON output structure for a single matching row.
#[derive(Serialize)]
pub struct RowOutput<'a> {
    /// Zero-based index among the table's data rows.
    pub row: usize,
    pub cells: &'a [String],
}

/// JSON output structure for `filter --count`.
#[derive(Serialize)]
pub struct CountOutput<'a> {
    pub query: &'a str,
    pub matched: usize,
    pub total: usize,
}

/// JSON output structure for `filter --explain`.
#[derive(Serialize)]
pub struct ExplainOutput<'a> {
    pub query: &'a str,
    pub predicate: String,
    pub terms: Vec<TermOutput<'a>>,
}

/// JSON output structure for one compiled term.
#[derive(Serialize)]
pub struct TermOutput<'a> {
    pub description: String,
    pub regex: &'a str,
    pub negate: bool,
    pub parsed: &'a [ParsedTerm],
}

/// Formats matching rows as JSON.
pub fn format_rows_json(
    query: &str,
    filter: &CompiledFilter,
    table: &Table,
    directory: &ColumnDirectory,
    evaluation: &Evaluation,
) -> Result<String, serde_json::Error> {
    let rows = evaluation
        .matched_rows()
        .filter_map(|i| table.rows().get(i).map(|cells| RowOutput { row: i, cells }))
        .collect();

    let output = FilterOutput {
        query,
        predicate: filter.description(),
        matched: evaluation.matched,
        total: evaluation.total(),
        columns: directory.names().collect(),
        rows,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats matching rows as delimited text, header first.
pub fn format_rows_text(table: &Table, evaluation: &Evaluation, use_colors: bool) -> String {
    let mut output = String::new();

    if let Some(header) = table.header() {
        let header = table.join(header);
        if use_colors {
            output.push_str(&format!("{}\n", header.dimmed()));
        } else {
            output.push_str(&header);
            output.push('\n');
        }
    }

    for i in evaluation.matched_rows() {
        if let Some(cells) = table.rows().get(i) {
            output.push_str(&table.join(cells));
            output.push('\n');
        }
    }

    output
}

/// Formats the matched row count as JSON.
pub fn format_count_json(query: &str, evaluation: &Evaluation) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CountOutput {
        query,
        matched: evaluation.matched,
        total: evaluation.total(),
    })
}

/// Formats a compiled filter as one line per term.
pub fn format_explain_text(filter: &CompiledFilter, use_colors: bool) -> String {
    let CompiledFilter::Predicate(predicate) = filter else {
        return format!("{}\n", filter.description());
    };

    let mut output = format!("{}\n", predicate.description());
    for term in predicate.terms() {
        let regex = format!("/{}/", term.source());
        let regex = if use_colors {
            regex.cyan().to_string()
        } else {
            regex
        };
        output.push_str(&format!("  {}  {}\n", term.description(), regex));
    }
    output
}

/// Formats a compiled filter as JSON.
pub fn format_explain_json(
    query: &str,
    filter: &CompiledFilter,
) -> Result<String, serde_json::Error> {
    let terms = match filter {
        CompiledFilter::AcceptAll => Vec::new(),
        CompiledFilter::Predicate(predicate) => predicate
            .terms()
            .iter()
            .map(|term| TermOutput {
                description: term.description(),
                regex: term.source(),
                negate: term.is_negated(),
                parsed: term.terms(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&ExplainOutput {
        query,
        predicate: filter.description(),
        terms,
    })
}

/// Formats the "N of M rows matched" summary line.
pub fn format_summary(evaluation: &Evaluation, use_colors: bool) -> String {
    let noun = if evaluation.total() == 1 { "row" } else { "rows" };
    let line = format!(
        "{} of {} {} matched",
        evaluation.matched,
        evaluation.total(),
        noun
    );
    if use_colors {
        line.dimmed().to_string()
    } else {
        line
    }
}
