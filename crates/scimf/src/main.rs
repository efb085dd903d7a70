use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::config::{Config, OutputConfig};
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Completions never read the config file.
    let loaded = match cli.command {
        Commands::Completions { .. } => Ok(CommandContext::new(&cli, Config::default())),
        _ => CommandContext::load(&cli),
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            let use_colors = commands::colors_enabled(&cli, &OutputConfig::default());
            return fail(&cli, &e, use_colors);
        }
    };

    match run(&ctx, &cli.command) {
        Ok(code) => code,
        Err(e) => fail(&cli, &e, ctx.use_colors),
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(ctx: &CommandContext, command: &Commands) -> commands::Result<ExitCode> {
    match command {
        Commands::Completions { shell } => commands::completions::execute(*shell)?,
        Commands::Filter { expr, tree } => {
            commands::filter::execute(ctx, expr.as_deref(), *tree)?;
        }
        Commands::Path { path, tree } => {
            commands::path::execute(ctx, path.as_deref(), *tree)?;
        }
        Commands::Compare { left, right } => {
            if !commands::compare::execute(ctx, left, right)? {
                return Ok(ExitCode::from(1));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn fail(cli: &Cli, e: &CommandError, use_colors: bool) -> ExitCode {
    report_error(cli, e, use_colors);
    ExitCode::from(exit_status(e))
}

fn report_error(cli: &Cli, e: &CommandError, use_colors: bool) {
    if cli.json {
        let mut error_json = serde_json::json!({
            "error": {
                "code": error_code(e),
                "message": e.to_string(),
            }
        });
        if let CommandError::Parse { input, source } = e {
            error_json["error"]["position"] = serde_json::json!(output::caret_offset(input, source));
        }
        eprintln!("{error_json:#}");
        return;
    }

    eprintln!("Error: {e}");
    if let CommandError::Parse { input, source } = e {
        if let Some(snippet) = output::caret_snippet(input, source, use_colors) {
            eprintln!("{snippet}");
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Parse { .. } => "PARSE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Parse { .. } => 1,
        CommandError::Config(_) => 5,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}
