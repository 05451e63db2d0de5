use std::io;
use std::path::PathBuf;

use crate::models::DocumentKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading, writing, deleting or listing failed.
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not a well-formed document.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{} is not a {expected} document (found {found:?})", path.display())]
    InvalidDocumentKind {
        path: PathBuf,
        expected: DocumentKind,
        found: Option<String>,
    },

    #[error("invalid package id: {0:?}")]
    InvalidPackageId(String),

    #[error("invalid version id: {0:?}")]
    InvalidVersionId(String),

    #[error("version {version_id} already exists in package {package_id}")]
    VersionExists {
        package_id: String,
        version_id: String,
    },

    #[error("version {version_id} not found in package {package_id}")]
    VersionNotFound {
        package_id: String,
        version_id: String,
    },
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// True for failures of the underlying storage, including unparseable contents.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Parse { .. })
    }

    /// True when the failure means the requested thing does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Storage { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::VersionNotFound { .. } => true,
            _ => false,
        }
    }
}
