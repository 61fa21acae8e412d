//! Warning sinks for recovered resolution failures
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{ErrorKind, LoaderError};
use serde::Serialize;
use std::error::Error as _;
use std::fmt;
use std::sync::Mutex;

/// A warning emitted when resolution falls back to the fallback schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Which failure was recovered
    pub kind: ErrorKind,
    /// Locator passed to the loader
    pub locator: String,
    /// Human-readable failure message
    pub message: String,
    /// Underlying cause, if the failure wraps one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl Diagnostic {
    /// Build a diagnostic from a recovered error
    pub fn from_error(locator: &str, error: &LoaderError) -> Self {
        Self {
            kind: error.kind(),
            locator: locator.to_string(),
            message: error.to_string(),
            cause: error.source().map(|cause| cause.to_string()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " (caused by: {})", cause)?;
        }
        Ok(())
    }
}

/// Destination for resolution warnings
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    /// Report a recovered failure
    fn warn(&self, diagnostic: Diagnostic);
}

/// Sink that forwards warnings to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = ?diagnostic.kind,
            locator = %diagnostic.locator,
            cause = diagnostic.cause.as_deref().unwrap_or(""),
            "{}",
            diagnostic.message
        );
    }
}

/// Sink that keeps every warning in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out the warnings recorded so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(diagnostics) => diagnostics.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Take the recorded warnings, leaving the sink empty
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(mut diagnostics) => std::mem::take(&mut *diagnostics),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Number of recorded warnings
    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, diagnostic: Diagnostic) {
        match self.diagnostics.lock() {
            Ok(mut diagnostics) => diagnostics.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
