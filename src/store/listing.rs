//! Directory listing, classified in memory.

use std::path::Path;

use crate::error::{Error, Result};

use super::{HIDDEN_PREFIX, VERSION_FILE_EXT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with(HIDDEN_PREFIX)
    }

    /// Whether this entry may hold a package. The package document still has
    /// to be checked.
    pub fn is_package_candidate(&self) -> bool {
        self.is_dir && !self.is_hidden()
    }

    /// The version id this entry stores, if it is a version document.
    ///
    /// The extension must match exactly, so the id always maps back to this
    /// file name; it is stripped once.
    pub fn version_id(&self) -> Option<&str> {
        if self.is_dir || self.is_hidden() {
            return None;
        }

        self.name
            .strip_suffix(VERSION_FILE_EXT)
            .filter(|id| !id.is_empty())
    }
}

/// List the immediate entries of `path`. Order follows the OS and is not stable.
pub async fn list_dir(path: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = tokio::fs::read_dir(path)
        .await
        .map_err(|e| Error::storage(path, e))?;

    let mut listed = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::storage(path, e))?
    {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::debug!(name = ?raw, "skipping non UTF-8 entry");
                continue;
            }
        };

        let file_type = entry
            .file_type()
            .await
            .map_err(|e| Error::storage(entry.path(), e))?;

        listed.push(DirEntry {
            name,
            is_dir: file_type.is_dir(),
        });
    }

    Ok(listed)
}
