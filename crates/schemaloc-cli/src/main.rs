//! Schemaloc CLI - resolve schema locators from the command line
//!
//! This is the main entry point for the Schemaloc CLI application, providing
//! commands for resolving and classifying schema locators with the same
//! rules an application applies at startup.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::LoggingConfig;
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Run the application
    let result = run(cli);

    // Handle the result
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    // Completions need neither configuration nor logging
    if let Commands::Completions(args) = &cli.command {
        return handlers::handle_completions(args);
    }

    let mut config = Config::load_with_file(cli.config.as_deref())?;

    // Initialize logging
    if let Err(e) = init_logging(&cli, &config.logging, &mut config.warnings) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    execute(cli, &config)
}

#[instrument(skip_all, fields(command = ?cli.command))]
fn execute(cli: Cli, config: &Config) -> Result<()> {
    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);
    report_warnings(config, &mut output)?;

    tracing::info!(verbosity = cli.verbosity_level(), "Executing command");

    match cli.command {
        Commands::Resolve(args) => handlers::handle_resolve(args, config, &mut output),
        Commands::Classify(args) => handlers::handle_classify(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(&args),
    }
}

/// Surface problems found before logging was set up
fn report_warnings(config: &Config, output: &mut OutputWriter) -> Result<()> {
    for warning in &config.warnings {
        output.warning(warning)?;
    }
    Ok(())
}

/// Initialize the logging system, collecting configuration warnings
fn init_logging(
    cli: &Cli,
    file: &config::LoggingConfig,
    warnings: &mut Vec<String>,
) -> Result<()> {
    // Create logging configuration from CLI args, config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    if cli.verbose == 0 {
        warnings.extend(logging_config.merge_with_file(file));
    }
    warnings.extend(logging_config.merge_with_env());

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
