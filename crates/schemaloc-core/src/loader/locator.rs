//! Locator prefix classification
//!
//! A schema locator carries no structure beyond its prefix. This module holds
//! the recognized prefixes and the pure functions that classify a locator and
//! derive the property key used for indirection.
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::fmt;

/// Prefix of an inline JSON schema literal
pub const JSON_PREFIX: &str = "{";

/// Prefix of a bundled resource path
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Prefix of a filesystem path
pub const FILE_PREFIX: &str = "file:";

/// Prefix of a property indirection
pub const PROPERTY_PREFIX: &str = "$";

/// Text returned whenever a locator cannot be resolved through a recoverable path
pub const FALLBACK_SCHEMA: &str = "{}";

/// Characters removed anywhere in a property locator to form its lookup key
const PROPERTY_KEY_STRIP: [char; 4] = ['$', '{', '}', ':'];

/// Classification of a locator by its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixKind {
    /// Inline schema text, returned verbatim
    Literal,
    /// `classpath:` bundled resource
    BundledResource,
    /// `file:` filesystem path
    FilesystemFile,
    /// `$` reference into the property environment
    PropertyIndirection,
    /// None of the above
    Unrecognized,
}

impl PrefixKind {
    /// Get the kind name as it appears in logs and output
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixKind::Literal => "literal",
            PrefixKind::BundledResource => "bundled_resource",
            PrefixKind::FilesystemFile => "filesystem_file",
            PrefixKind::PropertyIndirection => "property_indirection",
            PrefixKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for PrefixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a locator. `$` locators are only indirections when an environment is present.
pub fn classify(locator: &str, env_present: bool) -> PrefixKind {
    if locator.starts_with(JSON_PREFIX) {
        PrefixKind::Literal
    } else if locator.starts_with(CLASSPATH_PREFIX) {
        PrefixKind::BundledResource
    } else if locator.starts_with(FILE_PREFIX) {
        PrefixKind::FilesystemFile
    } else if env_present && locator.starts_with(PROPERTY_PREFIX) {
        PrefixKind::PropertyIndirection
    } else {
        PrefixKind::Unrecognized
    }
}

/// Classify a property value. Only source prefixes are followed; anything else is unrecognized.
pub fn classify_property_value(value: &str) -> PrefixKind {
    if value.starts_with(FILE_PREFIX) {
        PrefixKind::FilesystemFile
    } else if value.starts_with(CLASSPATH_PREFIX) {
        PrefixKind::BundledResource
    } else {
        PrefixKind::Unrecognized
    }
}

/// Derive the property key of an indirection locator.
///
/// Every `$`, `{`, `}` and `:` is removed wherever it appears, so `${name}`,
/// `$name` and `$n:a:m:e` all yield `name`. A default written as
/// `${name:default}` is not split off; it yields `namedefault`.
pub fn property_key(locator: &str) -> String {
    locator
        .chars()
        .filter(|ch| !PROPERTY_KEY_STRIP.contains(ch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(classify("{\"a\":1}", false), PrefixKind::Literal);
        assert_eq!(classify("{", true), PrefixKind::Literal);
        assert_eq!(classify("classpath:schema.json", false), PrefixKind::BundledResource);
        assert_eq!(classify("file:/tmp/s.json", false), PrefixKind::FilesystemFile);
        assert_eq!(classify("${SCHEMA}", true), PrefixKind::PropertyIndirection);
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify("", true), PrefixKind::Unrecognized);
        assert_eq!(classify("unknown-form", true), PrefixKind::Unrecognized);
        assert_eq!(classify("${SCHEMA}", false), PrefixKind::Unrecognized);
        // prefixes are exact and case-sensitive
        assert_eq!(classify("Classpath:a.json", true), PrefixKind::Unrecognized);
        assert_eq!(classify("FILE:/a.json", true), PrefixKind::Unrecognized);
        assert_eq!(classify(" {}", true), PrefixKind::Unrecognized);
    }

    #[test]
    fn test_classify_property_value() {
        assert_eq!(classify_property_value("file:/a.json"), PrefixKind::FilesystemFile);
        assert_eq!(classify_property_value("classpath:a.json"), PrefixKind::BundledResource);
        assert_eq!(classify_property_value("{}"), PrefixKind::Unrecognized);
        assert_eq!(classify_property_value("${OTHER}"), PrefixKind::Unrecognized);
        assert_eq!(classify_property_value(""), PrefixKind::Unrecognized);
    }

    #[test]
    fn test_property_key() {
        assert_eq!(property_key("${name}"), "name");
        assert_eq!(property_key("$name"), "name");
        assert_eq!(property_key("$n:a:m:e"), "name");
        assert_eq!(property_key("${name:default}"), "namedefault");
        assert_eq!(property_key("${a.b-c}"), "a.b-c");
        assert_eq!(property_key("${}"), "");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PrefixKind::PropertyIndirection.to_string(), "property_indirection");
        assert_eq!(
            serde_json::to_value(PrefixKind::BundledResource).unwrap(),
            serde_json::json!("bundled_resource")
        );
    }
}
