//! Command implementations for the rf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod columns;
pub mod completions;
pub mod config;
pub mod filter;
pub mod syntax;

use std::path::Path;

use rowfilter_combinator::{Engine, TracingDiagnostics};
use rowfilter_rs::{DirectoryError, FilterError};

use crate::cli::{Cli, TableArgs};
use crate::table::Table;
use config::{parse_delimiter, Config};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter query error.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// The table header cannot be used as a column directory.
    #[error("table error: {0}")]
    Table(#[from] DirectoryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Whether grammar rules are traced while parsing.
    pub trace_parser: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are off with `--no-color` or when `NO_COLOR` is set.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            trace_parser: cli.trace_parser,
        }
    }

    /// Applies config file preferences the command line left open.
    pub fn with_config(mut self, config: &Config) -> Self {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        self
    }

    /// Returns the combinator engine for building query grammars.
    pub fn engine(&self) -> Engine {
        if self.trace_parser {
            Engine::with_diagnostics(TracingDiagnostics)
        } else {
            Engine::new()
        }
    }
}

/// Reads the input table, with command-line table options taking
/// precedence over the config file.
pub fn read_table(file: Option<&Path>, args: &TableArgs, config: &Config) -> Result<Table> {
    let delimiter = match &args.delimiter {
        Some(delimiter) => parse_delimiter(delimiter)?,
        None => config.delimiter()?,
    };
    let has_header = !args.no_header && config.header();
    Ok(Table::read(file, delimiter, has_header)?)
}
