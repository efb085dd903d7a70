//! Command implementations for the scimf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod compare;
pub mod completions;
pub mod config;
pub mod filter;
pub mod path;

use std::env;
use std::io::{self, Read};

use scim_filter_rs::{FilterError, FilterParser};
use tracing::debug;

use crate::cli::Cli;
use config::{load_config, Config, OutputConfig};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter or path parsing error.
    #[error("parse error: {source}")]
    Parse {
        /// The text that failed to parse.
        input: String,
        /// The parser's error.
        source: FilterError,
    },

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

impl CommandError {
    /// Wraps a parser error together with the text it refers to.
    pub fn parse(input: &str, source: FilterError) -> Self {
        CommandError::Parse {
            input: input.to_string(),
            source,
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only, results are conveyed by exit status).
    pub quiet: bool,
    /// Parser configured from the `[parser]` config table.
    pub parser: FilterParser,
}

impl CommandContext {
    /// Creates a command context from CLI arguments and a loaded config.
    pub fn new(cli: &Cli, config: Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: colors_enabled(cli, &config.output),
            quiet: cli.quiet,
            parser: FilterParser::with_options(config.parser),
        }
    }

    /// Loads the config named on the command line (or the default one) and
    /// builds a context from it.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref())?;
        debug!(options = ?config.parser, "loaded parser options");
        Ok(Self::new(cli, config))
    }

    /// Returns true when results should be written to stdout.
    pub fn prints_results(&self) -> bool {
        !self.quiet
    }
}

/// Colours are on unless `--no-color`, `NO_COLOR` or `[output] color = false`
/// turns them off.
pub fn colors_enabled(cli: &Cli, output: &OutputConfig) -> bool {
    !cli.no_color && env::var_os("NO_COLOR").is_none() && output.color.unwrap_or(true)
}

/// Returns the command-line argument, or all of `reader` with trailing line
/// breaks removed.
pub fn read_input_from(arg: Option<&str>, mut reader: impl Read) -> Result<String> {
    match arg {
        Some(text) => Ok(text.to_string()),
        None => {
            let mut buffer = String::new();
            reader.read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
    }
}

/// Returns the command-line argument, or standard input when it is absent.
pub fn read_input(arg: Option<&str>) -> Result<String> {
    read_input_from(arg, io::stdin().lock())
}
