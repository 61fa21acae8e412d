//! Schema locator resolution
//!
//! This module turns a schema locator string into schema text:
//! - Inline JSON literals (`{...}`) returned verbatim
//! - Bundled resources (`classpath:`) from an embedded table or resource directories
//! - Filesystem files (`file:`)
//! - One level of property indirection (`${NAME}`) to either of the above
//!
//! Unreadable or unrecognized locators resolve to the fallback schema `{}`
//! and a warning on the injected [`DiagnosticSink`].
//!
//! # Example Usage
//!
//! ```rust
//! use schemaloc_core::loader::{EmbeddedResources, Properties, SchemaLoader};
//! use std::sync::Arc;
//!
//! let loader = SchemaLoader::with_resources(Arc::new(
//!     EmbeddedResources::new().with("user.json", "{\"name\": \"required\"}"),
//! ));
//! let env: Properties = [("USER_SCHEMA", "classpath:user.json")].into_iter().collect();
//!
//! let schema = loader.load("${USER_SCHEMA}", Some(&env))?;
//! assert_eq!(schema, "{\"name\": \"required\"}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

pub mod diagnostics;
pub mod error;
pub mod file;
pub mod locator;
pub mod properties;
pub mod resource;
pub mod schema_loader;

pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use error::{ErrorKind, LoaderError, LoaderResult};
pub use file::FileReader;
pub use locator::{classify, property_key, PrefixKind, FALLBACK_SCHEMA};
pub use properties::Properties;
pub use resource::{DirectoryResources, EmbeddedResources, ResourceReader, ResourceSet};
pub use schema_loader::{load, Resolution, SchemaLoader};
