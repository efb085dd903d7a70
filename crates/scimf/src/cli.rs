//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the scimf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// scimf - Parse, inspect and compare SCIM filters and attribute paths
#[derive(Parser, Debug)]
#[command(name = "scimf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (default: ~/.config/scimf/config.toml)
    #[arg(long, global = true, env = "SCIMF_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a filter and print its canonical form
    #[command(alias = "f")]
    Filter {
        /// Filter expression (read from stdin when omitted)
        expr: Option<String>,

        /// Print the parsed tree instead of the canonical text
        #[arg(short, long)]
        tree: bool,
    },

    /// Parse an attribute path and print its canonical form
    #[command(alias = "p")]
    Path {
        /// Attribute path (read from stdin when omitted)
        path: Option<String>,

        /// Print the parsed elements instead of the canonical text
        #[arg(short, long)]
        tree: bool,
    },

    /// Check whether two filters are equivalent
    ///
    /// Operand order and repetition inside and/or groups are ignored.
    /// Exits with status 1 when the filters differ.
    Compare {
        /// First filter expression
        left: String,

        /// Second filter expression
        right: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
