//! Property environment used for locator indirection
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Key fragments whose values are never written to logs in clear text
const SENSITIVE_PATTERNS: [&str; 7] = [
    "API_KEY",
    "SECRET",
    "PASSWORD",
    "TOKEN",
    "CREDENTIAL",
    "PRIVATE_KEY",
    "ACCESS_KEY",
];

/// Read-only mapping from property name to property value
///
/// Lookups fall through to an optional defaults layer, so a caller can stack
/// explicit properties on top of e.g. the process environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: HashMap<String, String>,
    defaults: Option<Box<Properties>>,
}

impl Properties {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the process environment, skipping variables that are not valid Unicode
    pub fn from_process_env() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Load `KEY=VALUE` lines from a dotenv-style properties file
    ///
    /// Variable references inside values are expanded against the process
    /// environment the same way `dotenvy` does; nothing is exported to it.
    pub fn from_file(path: &Path) -> LoaderResult<Self> {
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| LoaderError::properties_file(path, e.to_string()))?;

        let mut properties = Self::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| LoaderError::properties_file(path, e.to_string()))?;
            properties.insert(key, value);
        }

        tracing::debug!(
            path = %path.display(),
            count = properties.len(),
            "Loaded properties file"
        );
        Ok(properties)
    }

    /// Set the layer consulted when a key is not defined here
    pub fn with_defaults(mut self, defaults: Properties) -> Self {
        self.defaults = Some(Box::new(defaults));
        self
    }

    /// Insert a property, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Copy every property of `other` over this layer
    pub fn extend_from(&mut self, other: &Properties) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Look up a property, consulting the defaults layer on a miss
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .or_else(|| self.defaults.as_ref().and_then(|d| d.get(key)))
    }

    /// Check if a key is defined here or in the defaults layer
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of properties in this layer, excluding defaults
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this layer has no properties
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if a property name looks like it holds a credential
    pub fn is_sensitive(key: &str) -> bool {
        let key_upper = key.to_uppercase();
        SENSITIVE_PATTERNS
            .iter()
            .any(|pattern| key_upper.contains(pattern))
    }

    /// Render a value for logging, hiding it when the key is sensitive
    pub fn redact_value(key: &str, value: &str) -> String {
        if Self::is_sensitive(key) {
            "[REDACTED]".to_string()
        } else {
            value.to_string()
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            defaults: None,
        }
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();

        let mut map = f.debug_map();
        for key in keys {
            map.entry(key, &Self::redact_value(key, &self.values[key]));
        }
        map.finish()?;

        if let Some(defaults) = &self.defaults {
            write!(f, " + defaults({} keys)", defaults.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lookup_and_defaults() {
        let defaults: Properties = [("SCHEMA", "file:/default.json"), ("ONLY_DEFAULT", "x")]
            .into_iter()
            .collect();
        let mut properties = Properties::new().with_defaults(defaults);
        properties.insert("SCHEMA", "classpath:override.json");

        assert_eq!(properties.get("SCHEMA"), Some("classpath:override.json"));
        assert_eq!(properties.get("ONLY_DEFAULT"), Some("x"));
        assert_eq!(properties.get("MISSING"), None);
        assert!(properties.contains_key("ONLY_DEFAULT"));
        assert_eq!(properties.len(), 1);
    }

    #[test]
    fn test_extend_from() {
        let mut base: Properties = [("A", "1"), ("B", "2")].into_iter().collect();
        let overrides: Properties = [("B", "3")].into_iter().collect();
        base.extend_from(&overrides);

        assert_eq!(base.get("A"), Some("1"));
        assert_eq!(base.get("B"), Some("3"));
    }

    #[test]
    fn test_from_file() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schemas.env");
        fs::write(
            &path,
            "# schema locations\nUSER_SCHEMA=file:/etc/schemas/user.json\nORDER_SCHEMA=\"classpath:order.json\"\n",
        )
        .unwrap();

        let properties = Properties::from_file(&path)?;
        assert_eq!(properties.len(), 2);
        assert_eq!(properties.get("USER_SCHEMA"), Some("file:/etc/schemas/user.json"));
        assert_eq!(properties.get("ORDER_SCHEMA"), Some("classpath:order.json"));
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempdir().unwrap();
        let err = Properties::from_file(&dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, LoaderError::PropertiesFile { .. }));
    }

    #[test]
    fn test_debug_redacts_sensitive_values() {
        let properties: Properties = [("DB_PASSWORD", "hunter2"), ("SCHEMA", "file:/a.json")]
            .into_iter()
            .collect();
        let rendered = format!("{:?}", properties);

        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("file:/a.json"));
    }

    #[test]
    fn test_process_env_as_lowest_layer() {
        std::env::set_var("SCHEMALOC_PROPERTIES_TEST_SHADOWED", "from-process");
        std::env::set_var("SCHEMALOC_PROPERTIES_TEST_ONLY_PROCESS", "classpath:a.json");

        let process = Properties::from_process_env();
        assert_eq!(
            process.get("SCHEMALOC_PROPERTIES_TEST_ONLY_PROCESS"),
            Some("classpath:a.json")
        );

        let mut properties = Properties::new().with_defaults(process);
        properties.insert("SCHEMALOC_PROPERTIES_TEST_SHADOWED", "from-explicit");

        assert_eq!(
            properties.get("SCHEMALOC_PROPERTIES_TEST_SHADOWED"),
            Some("from-explicit")
        );
        assert_eq!(
            properties.get("SCHEMALOC_PROPERTIES_TEST_ONLY_PROCESS"),
            Some("classpath:a.json")
        );
        assert_eq!(properties.len(), 1);

        std::env::remove_var("SCHEMALOC_PROPERTIES_TEST_SHADOWED");
        std::env::remove_var("SCHEMALOC_PROPERTIES_TEST_ONLY_PROCESS");
    }

    #[test]
    fn test_is_sensitive() {
        assert!(Properties::is_sensitive("api_key"));
        assert!(Properties::is_sensitive("GITHUB_TOKEN"));
        assert!(!Properties::is_sensitive("USER_SCHEMA"));
    }
}
