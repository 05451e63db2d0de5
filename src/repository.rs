//! Calling-layer policy on top of [`ProjectStore`].
//!
//! The store overwrites unconditionally and never looks at metadata. The
//! repository adds what the editor needs: name validation, "add" that refuses
//! to overwrite, "update" that refuses to create, the next version prefix, and
//! editable views combining a version with its inherited history.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::{merge_phrases, ProjectStore, HIDDEN_PREFIX};

static VERSION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9_-]*$").expect("valid version name pattern"));

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)_").expect("valid numbered prefix pattern"));

const LANGUAGES_KEY: &str = "languages";

/// Minimum width of a suggested numeric prefix.
const MIN_PREFIX_WIDTH: usize = 2;

/// Check a name for a new version: non-empty ASCII letters, digits, `_` and `-`.
pub fn validate_version_name(name: &str) -> Result<()> {
    if name.is_empty() || !VERSION_NAME.is_match(name) {
        return Err(Error::InvalidVersionId(name.to_string()));
    }
    Ok(())
}

/// Suggest the numeric prefix for the next version of a package.
///
/// Takes the highest `NN_` prefix among `versions`, adds one and pads to the
/// widest existing prefix (at least two digits).
pub fn next_version_prefix(versions: &[String]) -> String {
    let numbers: Vec<&str> = versions
        .iter()
        .filter_map(|v| NUMBERED_PREFIX.captures(v)?.get(1).map(|m| m.as_str()))
        .collect();

    let width = numbers
        .iter()
        .map(|n| n.len())
        .max()
        .unwrap_or(0)
        .max(MIN_PREFIX_WIDTH);
    let next = numbers
        .iter()
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .map_or(1, |n| n.saturating_add(1));

    format!("{next:0width$}_")
}

/// Grid rows for an editable version, sorted by phrase key.
pub fn translation_rows(editable: &EditableVersion) -> Vec<TranslationRow> {
    merge_phrases([&editable.base_phrases, &editable.phrases])
        .into_iter()
        .map(|(id, translations)| {
            let overridden = editable
                .phrases
                .get(&id)
                .map(|own| own.keys().cloned().collect())
                .unwrap_or_default();
            TranslationRow {
                id,
                translations,
                overridden,
            }
        })
        .collect()
}

fn is_plain_segment(id: &str) -> bool {
    !id.is_empty() && !id.starts_with(HIDDEN_PREFIX) && !id.contains(['/', '\\'])
}

fn ensure_package_id(package_id: &str) -> Result<()> {
    if is_plain_segment(package_id) {
        Ok(())
    } else {
        Err(Error::InvalidPackageId(package_id.to_string()))
    }
}

fn ensure_version_id(version_id: &str) -> Result<()> {
    if is_plain_segment(version_id) {
        Ok(())
    } else {
        Err(Error::InvalidVersionId(version_id.to_string()))
    }
}

fn configured_languages(metadata: &Metadata) -> Option<Vec<String>> {
    metadata
        .get(LANGUAGES_KEY)?
        .as_array()?
        .iter()
        .map(|lang| lang.as_str().map(str::to_owned))
        .collect()
}

fn languages_in<'a>(phrase_sets: impl IntoIterator<Item = &'a Phrases>) -> Vec<String> {
    let languages: BTreeSet<&String> = phrase_sets
        .into_iter()
        .flat_map(|phrases| phrases.values())
        .flat_map(|translations| translations.keys())
        .collect();
    languages.into_iter().cloned().collect()
}

#[derive(Debug, Clone)]
pub struct Repository {
    store: ProjectStore,
}

impl Repository {
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ProjectStore::open(path).await?))
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    // ============================================================
    // Discovery
    // ============================================================

    pub async fn project_summary(&self) -> Result<ProjectSummary> {
        let project = self.store.read_project_header().await?;
        let packages = self.list_packages().await?;
        Ok(ProjectSummary { project, packages })
    }

    /// Package ids, sorted.
    pub async fn list_packages(&self) -> Result<Vec<String>> {
        let mut packages = self.store.list_packages().await?;
        packages.sort();
        Ok(packages)
    }

    pub async fn package_summary(&self, package_id: &str) -> Result<PackageSummary> {
        ensure_package_id(package_id)?;
        let package = self.store.read_package_header(package_id).await?;
        let versions = self.store.list_versions(package_id).await?;
        let next_version_prefix = next_version_prefix(&versions);

        Ok(PackageSummary {
            package,
            versions,
            next_version_prefix,
        })
    }

    pub async fn list_versions(&self, package_id: &str) -> Result<Vec<String>> {
        ensure_package_id(package_id)?;
        self.store.list_versions(package_id).await
    }

    async fn version_exists(&self, package_id: &str, version_id: &str) -> Result<bool> {
        let versions = self.store.list_versions(package_id).await?;
        Ok(versions.iter().any(|v| v == version_id))
    }

    // ============================================================
    // Reading versions
    // ============================================================

    pub async fn fetch_version(&self, package_id: &str, version_id: &str) -> Result<Version> {
        ensure_package_id(package_id)?;
        ensure_version_id(version_id)?;
        self.store.read_version(package_id, version_id).await
    }

    /// Merged phrases of the package's history through `version_id`.
    pub async fn history(&self, package_id: &str, version_id: &str) -> Result<Phrases> {
        ensure_package_id(package_id)?;
        ensure_version_id(version_id)?;
        self.store.merged_phrases_up_to(package_id, version_id).await
    }

    /// A version together with the merged phrases of every version before it.
    pub async fn fetch_editable_version(
        &self,
        package_id: &str,
        version_id: &str,
    ) -> Result<EditableVersion> {
        let version = self.fetch_version(package_id, version_id).await?;

        let mut earlier = self.store.versions_up_to(package_id, version_id).await?;
        if earlier.last().map(String::as_str) == Some(version_id) {
            earlier.pop();
        }
        let base_phrases = self.store.merge_phrase_history(package_id, &earlier).await?;

        let project = self.store.read_project_header().await?;
        let languages = configured_languages(&project.metadata)
            .unwrap_or_else(|| languages_in([&base_phrases, &version.phrases]));

        Ok(EditableVersion {
            id: version.id,
            metadata: version.metadata,
            phrases: version.phrases,
            base_phrases,
            languages,
        })
    }

    pub async fn translation_rows(
        &self,
        package_id: &str,
        version_id: &str,
    ) -> Result<Vec<TranslationRow>> {
        let editable = self.fetch_editable_version(package_id, version_id).await?;
        Ok(translation_rows(&editable))
    }

    // ============================================================
    // Mutations
    // ============================================================

    /// Create an empty version. Refuses to overwrite an existing one.
    pub async fn add_new_version(&self, package_id: &str, name: &str) -> Result<Version> {
        ensure_package_id(package_id)?;
        validate_version_name(name)?;

        if self.version_exists(package_id, name).await? {
            return Err(Error::VersionExists {
                package_id: package_id.to_string(),
                version_id: name.to_string(),
            });
        }

        let content = VersionContent::default();
        self.store.write_version(package_id, name, &content).await?;
        Ok(Version::from_content(name, content))
    }

    /// Replace the metadata and phrases of an existing version.
    pub async fn update_version(
        &self,
        package_id: &str,
        version_id: &str,
        content: VersionContent,
    ) -> Result<Version> {
        ensure_package_id(package_id)?;
        ensure_version_id(version_id)?;

        if !self.version_exists(package_id, version_id).await? {
            return Err(Error::VersionNotFound {
                package_id: package_id.to_string(),
                version_id: version_id.to_string(),
            });
        }

        self.store
            .write_version(package_id, version_id, &content)
            .await?;
        Ok(Version::from_content(version_id, content))
    }

    pub async fn delete_version(&self, package_id: &str, version_id: &str) -> Result<()> {
        ensure_package_id(package_id)?;
        ensure_version_id(version_id)?;
        self.store.delete_version(package_id, version_id).await
    }
}
