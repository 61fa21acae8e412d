//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Schemaloc CLI - resolve schema locators into schema text
///
/// Resolves inline JSON, `classpath:` resources, `file:` paths and
/// `${PROPERTY}` references the same way an application would at startup.
#[derive(Parser, Debug)]
#[command(
    name = "schemaloc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMALOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a schema locator and print the schema text
    Resolve(ResolveArgs),

    /// Show how a locator would be classified, without reading anything
    Classify(ClassifyArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Schema locator: '{...}', 'classpath:PATH', 'file:PATH' or '${PROPERTY}'
    #[arg(value_name = "LOCATOR", allow_hyphen_values = true)]
    pub locator: String,

    /// Define a property (KEY=VALUE); may be repeated
    #[arg(short = 'D', long = "property", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub properties: Vec<(String, String)>,

    /// Load properties from a dotenv-style file; may be repeated
    #[arg(short = 'p', long = "properties", value_name = "FILE")]
    pub properties_files: Vec<PathBuf>,

    /// Expose the process environment as properties (lowest precedence)
    #[arg(long)]
    pub process_env: bool,

    /// Resolve without any property environment
    #[arg(long, conflicts_with_all = ["properties", "properties_files", "process_env"])]
    pub no_env: bool,

    /// Directory holding bundled resources; may be repeated
    #[arg(short = 'r', long = "resource-dir", value_name = "DIR")]
    pub resource_dirs: Vec<PathBuf>,

    /// Exit with an error when the locator resolves to the fallback schema
    #[arg(long)]
    pub strict: bool,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Schema locator to classify
    #[arg(value_name = "LOCATOR", allow_hyphen_values = true)]
    pub locator: String,

    /// Classify as if no property environment were available
    #[arg(long)]
    pub no_env: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

/// Parse a `KEY=VALUE` property definition. The value may itself contain `=`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid property '{}': expected KEY=VALUE", s)),
    }
}
