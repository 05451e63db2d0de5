//! File-backed versioned phrase store.
//!
//! Layout under a project root:
//!
//! ```text
//! <root>/project.hoshi                  project document
//! <root>/<package>/package.hoshi        package document
//! <root>/<package>/<version>.yaml       one document per version
//! ```
//!
//! Every call goes to the filesystem; nothing is cached. There is no locking:
//! concurrent writers to the same version file race and the last one wins.

pub mod codec;
mod hierarchy;
mod history;
pub mod listing;
mod mutation;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub use history::{merge_phrases, select_up_to};

/// Well-known name of the project document at the root.
pub const PROJECT_FILE_NAME: &str = "project.hoshi";

/// Well-known name of the package document inside each package directory.
pub const PACKAGE_FILE_NAME: &str = "package.hoshi";

/// Reserved extension of version documents, stripped to form the version id.
/// Matched exactly, including case.
pub const VERSION_FILE_EXT: &str = ".yaml";

/// Entries whose name starts with this character are never packages or versions.
pub const HIDDEN_PREFIX: char = '.';

/// Handle to a project directory. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    /// Use `root` as the project directory without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open a project given either its root directory or the path of its
    /// project document.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::storage(path, e))?;

        let root = if meta.is_dir() {
            path.to_path_buf()
        } else {
            path.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        };

        tracing::debug!(root = %root.display(), "opened project store");
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_path(&self) -> PathBuf {
        self.root.join(PROJECT_FILE_NAME)
    }

    pub fn package_dir(&self, package_id: &str) -> PathBuf {
        self.root.join(package_id)
    }

    pub fn package_path(&self, package_id: &str) -> PathBuf {
        self.package_dir(package_id).join(PACKAGE_FILE_NAME)
    }

    /// Canonical path of a version document.
    pub fn version_path(&self, package_id: &str, version_id: &str) -> PathBuf {
        self.package_dir(package_id)
            .join(format!("{version_id}{VERSION_FILE_EXT}"))
    }
}
