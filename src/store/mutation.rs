use crate::error::Result;
use crate::models::{DocumentKind, VersionContent};

use super::codec::{delete_document, write_document};
use super::ProjectStore;

impl ProjectStore {
    /// Write a version document, replacing any existing one.
    ///
    /// There is no create/update distinction here and no concurrency check.
    pub async fn write_version(
        &self,
        package_id: &str,
        version_id: &str,
        content: &VersionContent,
    ) -> Result<()> {
        let path = self.version_path(package_id, version_id);
        write_document(&path, DocumentKind::Version, content).await?;

        tracing::info!(
            package = package_id,
            version = version_id,
            phrases = content.phrases.len(),
            "wrote version"
        );
        Ok(())
    }

    /// Remove a version document. Fails if it does not exist.
    pub async fn delete_version(&self, package_id: &str, version_id: &str) -> Result<()> {
        delete_document(&self.version_path(package_id, version_id)).await?;

        tracing::info!(package = package_id, version = version_id, "deleted version");
        Ok(())
    }
}
