//! Schemaloc Core - schema locator resolution
//!
//! This crate resolves a single configuration string, a *schema locator*,
//! into the literal text of a validation schema. The locator's prefix picks
//! the source:
//!
//! - `{` - the locator is the schema, returned verbatim
//! - `classpath:` - a bundled resource
//! - `file:` - a filesystem path
//! - `$` - a property whose value is itself a `classpath:` or `file:` locator
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaloc_core::{load, FALLBACK_SCHEMA};
//!
//! // Inline schemas need no I/O
//! assert_eq!(load("{\"email\": \"email\"}", None)?, "{\"email\": \"email\"}");
//!
//! // Anything unrecognized degrades to the empty schema
//! assert_eq!(load("not-a-locator", None)?, FALLBACK_SCHEMA);
//! # Ok::<(), schemaloc_core::LoaderError>(())
//! ```
//!
//! ## Failure Policy
//!
//! Read failures never abort the caller: a missing file, a missing bundled
//! resource or an unrecognized locator yields `{}` plus a warning. The one
//! exception is a `$` locator naming a property the supplied environment
//! does not define, which is reported as [`LoaderError::MissingProperty`].
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

pub mod loader;

// Re-export commonly used types for convenience
pub use loader::{
    classify, load, property_key, Diagnostic, DiagnosticSink, DirectoryResources,
    EmbeddedResources, ErrorKind, FileReader, LoaderError, LoaderResult, MemorySink, PrefixKind,
    Properties, Resolution, ResourceReader, ResourceSet, SchemaLoader, TracingSink,
    FALLBACK_SCHEMA,
};
