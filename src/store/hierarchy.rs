//! Discovery of the project, its packages and their versions.
//!
//! Documents are validated against their expected kind on every read.

use futures::future::join_all;
use serde::Deserialize;

use crate::error::Result;
use crate::models::document::null_as_default;
use crate::models::{DocumentKind, Metadata, Package, Project, Version, VersionContent};

use super::codec::read_document;
use super::listing::list_dir;
use super::ProjectStore;

#[derive(Debug, Deserialize)]
struct PackageDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    metadata: Metadata,
}

impl ProjectStore {
    pub async fn read_project_header(&self) -> Result<Project> {
        read_document(&self.project_path())
            .await?
            .into_body(DocumentKind::Project)
    }

    /// Package ids under the root.
    ///
    /// A non-hidden directory counts as a package only if its package document
    /// reads and carries the package discriminator; anything else is skipped
    /// rather than failing the listing. The order of the result is unspecified.
    pub async fn list_packages(&self) -> Result<Vec<String>> {
        let candidates: Vec<String> = list_dir(self.root())
            .await?
            .into_iter()
            .filter(|entry| entry.is_package_candidate())
            .map(|entry| entry.name)
            .collect();

        let checked = join_all(candidates.into_iter().map(|name| async move {
            let is_package = self.is_package(&name).await;
            (name, is_package)
        }))
        .await;

        Ok(checked
            .into_iter()
            .filter_map(|(name, is_package)| is_package.then_some(name))
            .collect())
    }

    async fn is_package(&self, dir_name: &str) -> bool {
        match self.read_package_document(dir_name).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(dir = dir_name, error = %e, "not a package");
                false
            }
        }
    }

    async fn read_package_document(&self, package_id: &str) -> Result<PackageDocument> {
        read_document(&self.package_path(package_id))
            .await?
            .into_body(DocumentKind::Package)
    }

    pub async fn read_package_header(&self, package_id: &str) -> Result<Package> {
        let document = self.read_package_document(package_id).await?;
        Ok(Package {
            id: package_id.to_string(),
            metadata: document.metadata,
        })
    }

    /// Version ids of a package, sorted ascending.
    pub async fn list_versions(&self, package_id: &str) -> Result<Vec<String>> {
        let mut versions: Vec<String> = list_dir(&self.package_dir(package_id))
            .await?
            .iter()
            .filter_map(|entry| entry.version_id().map(str::to_owned))
            .collect();
        versions.sort();
        Ok(versions)
    }

    pub async fn read_version(&self, package_id: &str, version_id: &str) -> Result<Version> {
        let content: VersionContent = read_document(&self.version_path(package_id, version_id))
            .await?
            .into_body(DocumentKind::Version)?;
        Ok(Version::from_content(version_id, content))
    }
}
