//! Logging setup for the Schemaloc CLI
//!
//! Resolution warnings from the core are `tracing` events, so the subscriber
//! configured here decides where fallback diagnostics end up.

use crate::error::{Error, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Enable ANSI colors on the console
    pub ansi: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact format for production
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "full" => Some(LogFormat::Full),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            ansi: std::io::stderr().is_terminal(),
            thread_ids: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {
                config.level = "warn".to_string();
            }
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
            }
        }

        config
    }

    /// Apply settings from the configuration file, returning a warning for an unknown format
    pub fn merge_with_file(&mut self, file: &crate::config::LoggingConfig) -> Option<String> {
        if let Some(level) = &file.level {
            self.level = level.clone();
        }
        match LogFormat::parse(&file.format) {
            Some(format) => {
                self.format = format;
                None
            }
            None => Some(format!(
                "Invalid log format in config: {}, using default",
                file.format
            )),
        }
    }

    /// Apply environment overrides, returning a warning for an unknown format
    pub fn merge_with_env(&mut self) -> Option<String> {
        // RUST_LOG takes precedence
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }

        let format = std::env::var("SCHEMALOC_LOG_FORMAT").ok()?;
        match LogFormat::parse(&format) {
            Some(parsed) => {
                self.format = parsed;
                None
            }
            None => Some(format!("Invalid log format: {}, using default", format)),
        }
    }
}

/// Initialize the global logging system; logs go to stderr so stdout stays schema text
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::other(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    // Use different subscriber based on format to avoid type conflicts
    let result = match config.format {
        LogFormat::Compact => tracing::subscriber::set_global_default(
            builder.with_ansi(config.ansi).compact().finish(),
        ),
        LogFormat::Full => {
            tracing::subscriber::set_global_default(builder.with_ansi(config.ansi).finish())
        }
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.with_ansi(false).json().finish())
        }
    };
    result.map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(config = ?config, "Logging system initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_from_verbosity() {
        let config = LoggingConfig::from_verbosity(0);
        assert_eq!(config.level, "warn");
        assert!(!config.source_location);

        let config = LoggingConfig::from_verbosity(2);
        assert_eq!(config.level, "debug");
        assert!(config.source_location);

        let config = LoggingConfig::from_verbosity(3);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.thread_ids);
    }

    #[test]
    fn test_merge_with_file() {
        let mut config = LoggingConfig::from_verbosity(0);
        let warning = config.merge_with_file(&crate::config::LoggingConfig {
            level: Some("schemaloc_core=debug".to_string()),
            format: "JSON".to_string(),
        });

        assert_eq!(warning, None);

        assert_eq!(config.level, "schemaloc_core=debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_file_format_is_reported() {
        let mut config = LoggingConfig::from_verbosity(1);
        let warning = config.merge_with_file(&crate::config::LoggingConfig {
            level: None,
            format: "xml".to_string(),
        });

        assert_eq!(
            warning.as_deref(),
            Some("Invalid log format in config: xml, using default")
        );
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse("Full"), Some(LogFormat::Full));
        assert_eq!(LogFormat::parse("xml"), None);
    }
}
