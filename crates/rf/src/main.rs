use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;
mod table;

use cli::{Cli, Commands, ConfigCommands};
use commands::columns::ColumnsOptions;
use commands::config::load_config;
use commands::filter::FilterOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let ctx = CommandContext::from_cli(&cli);
    match run(cli.command, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&error_json).unwrap_or_else(|_| error_json.to_string())
                );
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Installs the stderr log subscriber for the selected verbosity.
fn init_tracing(cli: &Cli) {
    let level = if cli.trace_parser {
        Level::TRACE
    } else if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(cli.trace_parser)
        .with_writer(io::stderr)
        .finish();

    // Only the first subscriber per process is installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(command: Commands, ctx: CommandContext) -> commands::Result<()> {
    match command {
        Commands::Filter {
            query,
            file,
            table,
            count,
            explain,
        } => {
            let config = load_config()?;
            let ctx = ctx.with_config(&config);
            let opts = FilterOptions {
                query,
                file,
                table,
                count,
                explain,
            };
            commands::filter::execute(&ctx, &opts, &config)
        }
        Commands::Columns { file, table } => {
            let config = load_config()?;
            let ctx = ctx.with_config(&config);
            commands::columns::execute(&ctx, &ColumnsOptions { file, table }, &config)
        }
        Commands::Syntax => commands::syntax::execute(&ctx),
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Init { force }) => commands::config::execute_init(&ctx, force),
        },
        Commands::Completions { shell } => Ok(commands::completions::execute(&shell)?),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Table(_) => "TABLE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) => 1,
        CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Table(_) => 4,
        CommandError::Config(_) => 5,
    }
}
