//! Filesystem schema reads
//!
//! Copyright (c) 2025 Schemaloc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use std::path::Path;

/// Reads schema files from the filesystem as UTF-8 text
#[derive(Debug, Default, Clone, Copy)]
pub struct FileReader;

impl FileReader {
    /// Create a file reader
    pub fn new() -> Self {
        Self
    }

    /// Read a whole file; `path` has its `file:` prefix already removed.
    ///
    /// The content is returned unchanged. Missing files, directories,
    /// permission failures and invalid UTF-8 are all [`LoaderError::FileRead`].
    pub fn read(&self, path: &str) -> LoaderResult<String> {
        let file_path = Path::new(path);
        let content = std::fs::read_to_string(file_path)
            .map_err(|e| LoaderError::file_read(file_path, e))?;

        tracing::debug!(path = %file_path.display(), bytes = content.len(), "Read schema file");
        Ok(content)
    }
}
