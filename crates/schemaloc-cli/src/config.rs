//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables
//! - Command-line arguments

use crate::cli::ResolveArgs;
use crate::error::{Error, Result};
use schemaloc_core::{DirectoryResources, Properties};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Bundled resource settings
    pub resources: ResourceConfig,

    /// Property environment settings
    pub properties: PropertiesConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Problems met while loading, reported once output is set up
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Where `classpath:` locators are looked up
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceConfig {
    /// Resource directories, searched in order
    pub dirs: Vec<PathBuf>,
}

/// How the property environment is assembled
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropertiesConfig {
    /// Dotenv-style files loaded before command-line files
    pub files: Vec<PathBuf>,

    /// Inline property values
    pub values: HashMap<String, String>,

    /// Expose the process environment as the lowest-precedence layer
    pub process_env: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::config_file(path, e))?;

        let mut config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| Error::config_file(path, e))?
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| Error::config_file(path, e))?
            }
            _ => {
                return Err(Error::config(format!(
                    "{} must be a .yaml, .yml or .json file",
                    path.display()
                )))
            }
        };

        config.anchor_paths(path.parent().unwrap_or_else(|| Path::new(".")));
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Ok(Self::load_first_of(&Self::default_config_paths()))
    }

    /// Load the first readable file among `paths`, recording the ones skipped
    fn load_first_of(paths: &[PathBuf]) -> Self {
        let mut warnings = Vec::new();
        for path in paths {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(mut config) => {
                        config.warnings = warnings;
                        return config;
                    }
                    Err(e) => warnings.push(format!("Ignoring unreadable config file: {}", e)),
                }
            }
        }

        // Return default config if no config file found
        Self {
            warnings,
            ..Self::default()
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".schemaloc.yaml"),
            PathBuf::from(".schemaloc.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let schemaloc_dir = config_dir.join("schemaloc");
            paths.push(schemaloc_dir.join("config.yaml"));
            paths.push(schemaloc_dir.join("config.json"));
        }

        paths
    }

    /// Resolve relative paths in the file against the directory holding it
    fn anchor_paths(&mut self, base: &Path) {
        for dir in &mut self.resources.dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        for file in &mut self.properties.files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }

    /// Resource set for a resolve run: command-line dirs, then config dirs, then the environment
    pub fn resources_for(&self, args: &ResolveArgs) -> DirectoryResources {
        if !args.resource_dirs.is_empty() {
            DirectoryResources::new(args.resource_dirs.iter().cloned())
        } else if !self.resources.dirs.is_empty() {
            DirectoryResources::new(self.resources.dirs.iter().cloned())
        } else {
            DirectoryResources::from_env()
        }
    }

    /// Property environment for a resolve run, or `None` under `--no-env`.
    ///
    /// Later layers win: process environment, config files, config values,
    /// command-line files, command-line `-D` definitions.
    pub fn properties_for(&self, args: &ResolveArgs) -> Result<Option<Properties>> {
        if args.no_env {
            return Ok(None);
        }

        let mut layered = Properties::new();
        for file in &self.properties.files {
            layered.extend_from(&Properties::from_file(file)?);
        }
        layered.extend_from(&self.properties.values.clone().into_iter().collect());
        for file in &args.properties_files {
            layered.extend_from(&Properties::from_file(file)?);
        }
        layered.extend_from(&args.properties.iter().cloned().collect());

        if self.properties.process_env || args.process_env {
            layered = layered.with_defaults(Properties::from_process_env());
        }

        tracing::debug!(properties = ?layered, "Assembled property environment");
        Ok(Some(layered))
    }
}
