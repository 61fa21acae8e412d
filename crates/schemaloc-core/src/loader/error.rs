//! Error types for schema locator resolution
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for schema locator resolution
///
/// Only [`LoaderError::MissingProperty`] ever escapes [`SchemaLoader::load`];
/// the read failures are recovered into the fallback schema and reported
/// through the diagnostic sink instead.
///
/// [`SchemaLoader::load`]: crate::loader::SchemaLoader::load
#[derive(Error, Debug)]
pub enum LoaderError {
    /// No known prefix matched the locator
    #[error(
        "Schema locator '{locator}' not recognized. Use 'classpath:', 'file:', \
         a '$' property reference or an inline JSON object starting with '{{'"
    )]
    UnrecognizedLocator { locator: String },

    /// Bundled resource lookup missed
    #[error("Bundled resource '{path}' not found")]
    ResourceNotFound { path: String },

    /// Bundled resource exists but could not be read or decoded
    #[error("Failed to read bundled resource '{path}': {source}")]
    ResourceRead {
        path: String,
        source: std::io::Error,
    },

    /// Filesystem read failure
    #[error("Failed to read schema file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Property indirection referenced a key the environment does not define
    #[error("Property '{key}' referenced by locator '{locator}' is not defined")]
    MissingProperty { key: String, locator: String },

    /// A properties file could not be loaded into an environment
    #[error("Failed to load properties file '{path}': {reason}")]
    PropertiesFile { path: PathBuf, reason: String },
}

/// Discriminant of [`LoaderError`], usable in diagnostics and output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnrecognizedLocator,
    ResourceNotFound,
    ResourceRead,
    FileRead,
    MissingProperty,
    PropertiesFile,
}

impl LoaderError {
    /// Create an unrecognized locator error
    pub fn unrecognized(locator: impl Into<String>) -> Self {
        Self::UnrecognizedLocator {
            locator: locator.into(),
        }
    }

    /// Create a resource lookup miss
    pub fn resource_not_found(path: impl Into<String>) -> Self {
        Self::ResourceNotFound { path: path.into() }
    }

    /// Create a resource read error
    pub fn resource_read(path: impl Into<String>, error: std::io::Error) -> Self {
        Self::ResourceRead {
            path: path.into(),
            source: error,
        }
    }

    /// Create a file read error with path context
    pub fn file_read(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source: error,
        }
    }

    /// Create a missing property error
    pub fn missing_property(key: impl Into<String>, locator: impl Into<String>) -> Self {
        Self::MissingProperty {
            key: key.into(),
            locator: locator.into(),
        }
    }

    /// Create a properties file error
    pub fn properties_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::PropertiesFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedLocator { .. } => ErrorKind::UnrecognizedLocator,
            Self::ResourceNotFound { .. } => ErrorKind::ResourceNotFound,
            Self::ResourceRead { .. } => ErrorKind::ResourceRead,
            Self::FileRead { .. } => ErrorKind::FileRead,
            Self::MissingProperty { .. } => ErrorKind::MissingProperty,
            Self::PropertiesFile { .. } => ErrorKind::PropertiesFile,
        }
    }

    /// Check if this error degrades to the fallback schema instead of failing the call
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedLocator { .. }
                | Self::ResourceNotFound { .. }
                | Self::ResourceRead { .. }
                | Self::FileRead { .. }
        )
    }
}
