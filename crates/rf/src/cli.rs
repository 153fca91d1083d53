//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the rf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// rf - Filter delimited tables with a small query language
#[derive(Parser, Debug)]
#[command(name = "rf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Trace every grammar rule while parsing the query
    #[arg(long, global = true)]
    pub trace_parser: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the rows of a table that match a query
    #[command(alias = "f")]
    Filter {
        /// Filter query (e.g., ':age "30" NOT /^draft/')
        query: String,

        /// Table file (default: stdin)
        file: Option<PathBuf>,

        #[command(flatten)]
        table: TableArgs,

        /// Print only the number of matching rows
        #[arg(short, long, conflicts_with = "explain")]
        count: bool,

        /// Print the compiled predicate instead of rows
        #[arg(long)]
        explain: bool,
    },

    /// List the columns a query can refer to
    Columns {
        /// Table file (default: stdin)
        file: Option<PathBuf>,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Show query syntax and examples
    Syntax,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// How the input table is read.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Cell delimiter: a single character, or tab/comma/pipe/semicolon/space.
    /// Input is plain delimited text: quotes are not special, so this is
    /// not a CSV reader
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// The first line is data, not a header
    #[arg(long)]
    pub no_header: bool,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
