//! Schema locator resolution
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

use crate::loader::{
    diagnostics::{Diagnostic, DiagnosticSink, TracingSink},
    error::{LoaderError, LoaderResult},
    file::FileReader,
    locator::{
        classify, classify_property_value, property_key, PrefixKind, CLASSPATH_PREFIX,
        FALLBACK_SCHEMA, FILE_PREFIX,
    },
    properties::Properties,
    resource::{DirectoryResources, ResourceReader, ResourceSet},
};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of resolving one locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// How the locator itself was classified
    pub kind: PrefixKind,
    /// Kind of the source actually read; differs from `kind` only for property indirection
    pub source_kind: PrefixKind,
    /// Property key looked up, for property indirection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Resolved schema text
    pub text: String,
    /// Whether `text` is the fallback schema
    pub fallback: bool,
}

/// Resolves schema locators into schema text
///
/// The loader holds no per-call state: it is only the resource set to read
/// `classpath:` locators from and the sink that receives fallback warnings.
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    resources: ResourceReader,
    files: FileReader,
    sink: Arc<dyn DiagnosticSink>,
}

impl SchemaLoader {
    /// Create a loader reading resources from `SCHEMALOC_RESOURCE_PATH` and warning through `tracing`
    pub fn new() -> Self {
        Self::with_resources(Arc::new(DirectoryResources::from_env()))
    }

    /// Create a loader over a custom resource set
    pub fn with_resources(resources: Arc<dyn ResourceSet>) -> Self {
        Self {
            resources: ResourceReader::new(resources),
            files: FileReader::new(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the sink that receives fallback warnings
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Resolve a locator into schema text.
    ///
    /// Every unresolvable or unreadable locator yields `"{}"` and a warning.
    /// The only error is [`LoaderError::MissingProperty`], raised when a `$`
    /// locator names a property `env` does not define.
    pub fn load(&self, locator: &str, env: Option<&Properties>) -> LoaderResult<String> {
        self.resolve(locator, env).map(|resolution| resolution.text)
    }

    /// Resolve a locator, reporting how it was resolved
    pub fn resolve(&self, locator: &str, env: Option<&Properties>) -> LoaderResult<Resolution> {
        let kind = classify(locator, env.is_some());
        tracing::debug!(locator = %locator, kind = %kind, "Resolving schema locator");

        match (kind, env) {
            (PrefixKind::Literal, _) => Ok(Resolution {
                kind,
                source_kind: kind,
                property: None,
                text: locator.to_string(),
                fallback: false,
            }),
            (PrefixKind::PropertyIndirection, Some(env)) => self.resolve_property(locator, env),
            _ => Ok(self.read_source(locator, locator, kind, None)),
        }
    }

    /// Follow one level of property indirection
    fn resolve_property(&self, locator: &str, env: &Properties) -> LoaderResult<Resolution> {
        let key = property_key(locator);
        let value = env
            .get(&key)
            .ok_or_else(|| LoaderError::missing_property(&key, locator))?;

        let source_kind = classify_property_value(value);
        tracing::debug!(
            key = %key,
            value = %Properties::redact_value(&key, value),
            source_kind = %source_kind,
            "Resolved schema property"
        );

        let mut resolution = self.read_source(locator, value, source_kind, Some(key));
        resolution.kind = PrefixKind::PropertyIndirection;
        Ok(resolution)
    }

    /// Read a `classpath:` or `file:` target, recovering every failure into the fallback
    fn read_source(
        &self,
        locator: &str,
        target: &str,
        source_kind: PrefixKind,
        property: Option<String>,
    ) -> Resolution {
        let result = match source_kind {
            PrefixKind::BundledResource => self.resources.read(strip(target, CLASSPATH_PREFIX)),
            PrefixKind::FilesystemFile => self.files.read(strip(target, FILE_PREFIX)),
            _ => Err(LoaderError::unrecognized(locator)),
        };

        let (text, fallback) = match result {
            Ok(text) => (text, false),
            Err(error) => {
                self.sink.warn(Diagnostic::from_error(locator, &error));
                (FALLBACK_SCHEMA.to_string(), true)
            }
        };

        Resolution {
            kind: source_kind,
            source_kind,
            property,
            text,
            fallback,
        }
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a locator with a default [`SchemaLoader`]
pub fn load(locator: &str, env: Option<&Properties>) -> LoaderResult<String> {
    SchemaLoader::new().load(locator, env)
}

fn strip<'a>(target: &'a str, prefix: &str) -> &'a str {
    target.strip_prefix(prefix).unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::diagnostics::MemorySink;
    use crate::loader::error::ErrorKind;
    use crate::loader::resource::EmbeddedResources;
    use std::fs;
    use tempfile::tempdir;

    fn loader_with(resources: EmbeddedResources) -> (SchemaLoader, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let loader = SchemaLoader::with_resources(Arc::new(resources)).with_sink(sink.clone());
        (loader, sink)
    }

    #[test]
    fn test_literal_is_returned_verbatim() -> LoaderResult<()> {
        let (loader, sink) = loader_with(EmbeddedResources::new());

        assert_eq!(loader.load("{\"a\": 1}  ", None)?, "{\"a\": 1}  ");
        assert_eq!(loader.load("{", Some(&Properties::new()))?, "{");
        assert!(sink.is_empty());
        Ok(())
    }

    #[test]
    fn test_bundled_resource() -> LoaderResult<()> {
        let (loader, sink) =
            loader_with(EmbeddedResources::new().with("user.json", "{\r\n\"name\":\"required\"\r\n}"));

        let resolution = loader.resolve("classpath:user.json", None)?;
        assert_eq!(resolution.kind, PrefixKind::BundledResource);
        assert_eq!(resolution.text, "{\n\"name\":\"required\"\n}");
        assert!(!resolution.fallback);
        assert!(sink.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_resource_falls_back() -> LoaderResult<()> {
        let (loader, sink) = loader_with(EmbeddedResources::new());

        let resolution = loader.resolve("classpath:missing.json", None)?;
        assert_eq!(resolution.text, FALLBACK_SCHEMA);
        assert!(resolution.fallback);

        let warnings = sink.take();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ErrorKind::ResourceNotFound);
        assert_eq!(warnings[0].locator, "classpath:missing.json");
        Ok(())
    }

    #[test]
    fn test_file_and_missing_file() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "{\"a\":1}\n").unwrap();
        let (loader, sink) = loader_with(EmbeddedResources::new());

        assert_eq!(loader.load(&format!("file:{}", path.display()), None)?, "{\"a\":1}\n");
        assert!(sink.is_empty());

        let missing = format!("file:{}", dir.path().join("nope.json").display());
        assert_eq!(loader.load(&missing, None)?, FALLBACK_SCHEMA);
        let warnings = sink.take();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ErrorKind::FileRead);
        assert!(warnings[0].cause.is_some());
        Ok(())
    }

    #[test]
    fn test_property_indirection() -> LoaderResult<()> {
        let (loader, sink) = loader_with(EmbeddedResources::new().with("order.json", "{\"id\":1}"));
        let env: Properties = [("ORDER_SCHEMA", "classpath:order.json")].into_iter().collect();

        let resolution = loader.resolve("${ORDER_SCHEMA}", Some(&env))?;
        assert_eq!(resolution.kind, PrefixKind::PropertyIndirection);
        assert_eq!(resolution.source_kind, PrefixKind::BundledResource);
        assert_eq!(resolution.property.as_deref(), Some("ORDER_SCHEMA"));
        assert_eq!(resolution.text, "{\"id\":1}");
        assert!(sink.is_empty());
        Ok(())
    }

    #[test]
    fn test_property_value_is_not_followed_twice() -> LoaderResult<()> {
        let (loader, sink) = loader_with(EmbeddedResources::new());
        let env: Properties = [("A", "${B}"), ("B", "file:/never/read.json"), ("C", "{\"x\":1}")]
            .into_iter()
            .collect();

        assert_eq!(loader.load("${A}", Some(&env))?, FALLBACK_SCHEMA);
        // an inline literal in a property is not a source
        assert_eq!(loader.load("${C}", Some(&env))?, FALLBACK_SCHEMA);

        let warnings = sink.take();
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w.kind == ErrorKind::UnrecognizedLocator));
        Ok(())
    }

    #[test]
    fn test_missing_property_is_an_error() {
        let (loader, sink) = loader_with(EmbeddedResources::new());

        let err = loader.load("${MISSING}", Some(&Properties::new())).unwrap_err();
        match err {
            LoaderError::MissingProperty { key, locator } => {
                assert_eq!(key, "MISSING");
                assert_eq!(locator, "${MISSING}");
            }
            other => panic!("Expected MissingProperty, got {:?}", other),
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unrecognized_locators() -> LoaderResult<()> {
        let (loader, sink) = loader_with(EmbeddedResources::new());

        assert_eq!(loader.load("", None)?, FALLBACK_SCHEMA);
        assert_eq!(loader.load("unknown-form", Some(&Properties::new()))?, FALLBACK_SCHEMA);
        assert_eq!(loader.load("${SCHEMA}", None)?, FALLBACK_SCHEMA);

        let warnings = sink.take();
        assert_eq!(warnings.len(), 3);
        assert!(warnings
            .iter()
            .all(|w| w.kind == ErrorKind::UnrecognizedLocator));
        Ok(())
    }
}
