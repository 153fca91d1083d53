//! Columns command implementation.
//!
//! Lists the columns a query can refer to, by name or declared index.

use std::path::PathBuf;

use super::config::Config;
use super::{read_table, CommandContext, Result};
use crate::cli::TableArgs;
use crate::output::{format_columns_json, format_columns_table};

/// Options for the columns command.
#[derive(Debug, Default)]
pub struct ColumnsOptions {
    /// Table file; stdin when `None`.
    pub file: Option<PathBuf>,
    /// How the table is read.
    pub table: TableArgs,
}

/// Executes the columns command.
pub fn execute(ctx: &CommandContext, opts: &ColumnsOptions, config: &Config) -> Result<()> {
    let table = read_table(opts.file.as_deref(), &opts.table, config)?;
    let directory = table.directory()?;

    if ctx.json_output {
        println!("{}", format_columns_json(&directory)?);
    } else {
        print!("{}", format_columns_table(&directory, ctx.use_colors));
    }

    Ok(())
}
