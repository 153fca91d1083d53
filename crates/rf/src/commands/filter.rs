//! Filter command implementation.
//!
//! Prints the rows of a table that match a filter query.

use std::path::PathBuf;
use std::sync::Arc;

use rowfilter_rs::{FilterCompiler, RowEvaluator};

use super::config::Config;
use super::{read_table, CommandContext, Result};
use crate::cli::TableArgs;
use crate::output::{
    format_count_json, format_explain_json, format_explain_text, format_rows_json,
    format_rows_text, format_summary,
};

/// Options for the filter command.
#[derive(Debug, Default)]
pub struct FilterOptions {
    /// Filter query.
    pub query: String,
    /// Table file; stdin when `None`.
    pub file: Option<PathBuf>,
    /// How the table is read.
    pub table: TableArgs,
    /// Print only the matched count.
    pub count: bool,
    /// Print the compiled predicate instead of rows.
    pub explain: bool,
}

/// Executes the filter command.
///
/// # Errors
///
/// Returns an error if the table cannot be read, its header does not form
/// a valid column directory, or the query is invalid.
pub fn execute(ctx: &CommandContext, opts: &FilterOptions, config: &Config) -> Result<()> {
    let table = read_table(opts.file.as_deref(), &opts.table, config)?;
    let directory = Arc::new(table.directory()?);

    let compiler = FilterCompiler::with_engine(Arc::clone(&directory), &ctx.engine())?;
    let filter = compiler.compile(&opts.query)?;
    if ctx.verbose {
        eprintln!("Predicate: {}", filter);
    }

    if opts.explain {
        if ctx.json_output {
            println!("{}", format_explain_json(&opts.query, &filter)?);
        } else {
            print!("{}", format_explain_text(&filter, ctx.use_colors));
        }
        return Ok(());
    }

    let evaluation = RowEvaluator::new(Arc::clone(&directory)).evaluate(&table, &filter);

    if opts.count {
        if ctx.json_output {
            println!("{}", format_count_json(&opts.query, &evaluation)?);
        } else {
            println!("{}", evaluation.matched);
        }
        return Ok(());
    }

    if ctx.json_output {
        println!(
            "{}",
            format_rows_json(&opts.query, &filter, &table, &directory, &evaluation)?
        );
    } else {
        print!("{}", format_rows_text(&table, &evaluation, ctx.use_colors));
        if !ctx.quiet && config.output.show_count.unwrap_or(true) {
            eprintln!("{}", format_summary(&evaluation, ctx.use_colors));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rowfilter_rs::FilterError;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::CommandError;

    fn context() -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            trace_parser: false,
        }
    }

    fn options(dir: &TempDir, content: &str, query: &str) -> FilterOptions {
        let path = dir.path().join("table.tsv");
        fs::write(&path, content).unwrap();
        FilterOptions {
            query: query.to_string(),
            file: Some(path),
            count: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_query_succeeds() {
        let dir = TempDir::new().unwrap();
        let opts = options(&dir, "a\tb\n1\t2\n", ":b 2");
        assert!(execute(&context(), &opts, &Config::default()).is_ok());
    }

    #[test]
    fn test_unknown_column_is_filter_error() {
        let dir = TempDir::new().unwrap();
        let opts = options(&dir, "a\tb\n1\t2\n", ":c 2");
        let err = execute(&context(), &opts, &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Filter(FilterError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_duplicate_header_is_table_error() {
        let dir = TempDir::new().unwrap();
        let opts = options(&dir, "a\ta\n1\t2\n", "1");
        let err = execute(&context(), &opts, &Config::default()).unwrap_err();
        assert!(matches!(err, CommandError::Table(_)));
    }

    #[test]
    fn test_invalid_delimiter_is_config_error() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(&dir, "a\n1\n", "1");
        opts.table.delimiter = Some("xx".to_string());
        let err = execute(&context(), &opts, &Config::default()).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let opts = FilterOptions {
            query: "x".to_string(),
            file: Some(PathBuf::from("/nonexistent/rf/table.tsv")),
            ..Default::default()
        };
        let err = execute(&context(), &opts, &Config::default()).unwrap_err();
        assert!(matches!(err, CommandError::Io(_)));
    }
}
