//! Bundled resource lookup
//!
//! Resources are addressed by a logical path such as `schemas/user.json`.
//! Where the bytes live is up to the [`ResourceSet`]: a table compiled into
//! the binary ([`EmbeddedResources`]) or a list of packaged resource
//! directories searched in order ([`DirectoryResources`]).
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Environment variable listing resource directories, in platform path-list syntax
pub const RESOURCE_PATH_ENV: &str = "SCHEMALOC_RESOURCE_PATH";

/// A set of bundled resources addressable by logical path
pub trait ResourceSet: Send + Sync + fmt::Debug {
    /// Open a resource for reading. A lookup miss is `Ok(None)`.
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>>;
}

/// Resources compiled into the program
///
/// ```rust
/// use schemaloc_core::loader::EmbeddedResources;
///
/// let resources = EmbeddedResources::new()
///     .with("schemas/empty.json", "{}");
/// assert!(resources.contains("schemas/empty.json"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    entries: HashMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedResources {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text resource, typically from `include_str!`
    pub fn with(self, path: impl Into<String>, contents: &'static str) -> Self {
        self.with_bytes(path, contents.as_bytes())
    }

    /// Add a binary resource, typically from `include_bytes!`
    pub fn with_bytes(
        mut self,
        path: impl Into<String>,
        contents: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        let path = path.into();
        self.entries
            .insert(logical_key(&path).to_string(), contents.into());
        self
    }

    /// Check if a resource is present
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(logical_key(path))
    }

    /// Number of resources in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceSet for EmbeddedResources {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
        Ok(self
            .entries
            .get(logical_key(path))
            .map(|bytes| Box::new(&bytes[..]) as Box<dyn Read + '_>))
    }
}

/// Resources packaged as files under one or more root directories
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    roots: Vec<PathBuf>,
}

impl DirectoryResources {
    /// Create a set searching `roots` in order
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Read roots from `SCHEMALOC_RESOURCE_PATH`, defaulting to the current directory
    pub fn from_env() -> Self {
        match std::env::var_os(RESOURCE_PATH_ENV) {
            Some(value) => Self::from_path_list(&value),
            None => Self::new([PathBuf::from(".")]),
        }
    }

    /// Split a platform path list into roots. Empty entries are skipped and
    /// a list with no usable entry means the current directory.
    pub fn from_path_list(value: &OsStr) -> Self {
        let roots: Vec<PathBuf> = std::env::split_paths(value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        if roots.is_empty() {
            Self::new([PathBuf::from(".")])
        } else {
            Self::new(roots)
        }
    }

    /// Configured root directories
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find the file backing a logical path, if any root has it
    pub fn locate(&self, path: &str) -> Option<PathBuf> {
        let relative = confined_relative_path(path)?;
        self.roots
            .iter()
            .map(|root| root.join(&relative))
            .find(|candidate| candidate.is_file())
    }
}

impl ResourceSet for DirectoryResources {
    fn open(&self, path: &str) -> io::Result<Option<Box<dyn Read + '_>>> {
        match self.locate(path) {
            Some(file_path) => {
                let file = File::open(&file_path)?;
                Ok(Some(Box::new(file)))
            }
            None => Ok(None),
        }
    }
}

/// Reads bundled resources as newline-joined UTF-8 text
#[derive(Debug, Clone)]
pub struct ResourceReader {
    resources: Arc<dyn ResourceSet>,
}

impl ResourceReader {
    /// Create a reader over a resource set
    pub fn new(resources: Arc<dyn ResourceSet>) -> Self {
        Self { resources }
    }

    /// Read a resource; `path` has its `classpath:` prefix already removed
    pub fn read(&self, path: &str) -> LoaderResult<String> {
        let mut reader = self
            .resources
            .open(path)
            .map_err(|e| LoaderError::resource_read(path, e))?
            .ok_or_else(|| LoaderError::resource_not_found(path))?;

        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| LoaderError::resource_read(path, e))?;

        tracing::debug!(path = %path, bytes = content.len(), "Read bundled resource");
        Ok(join_lines(&content))
    }
}

/// Join the lines of `text` with `\n`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. A terminator at the very end
/// does not start another line, so `"a\r\nb\r\n"` becomes `"a\nb"`.
pub fn join_lines(text: &str) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' => lines.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Logical resource keys ignore a leading `/`
fn logical_key(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Turn a logical path into a relative path that cannot leave its root
fn confined_relative_path(path: &str) -> Option<PathBuf> {
    let key = logical_key(path);
    if key.is_empty() {
        return None;
    }

    let mut relative = PathBuf::new();
    for component in Path::new(key).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}
