use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::document::null_as_default;
use super::phrase::lenient_phrases;
use super::{Metadata, Phrases, Translations};

/// A snapshot of phrase translations within a package.
///
/// The id is derived from the file name and is never stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub metadata: Metadata,
    pub phrases: Phrases,
}

/// The mutable payload of a version document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionContent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "lenient_phrases")]
    pub phrases: Phrases,
}

impl Version {
    pub fn from_content(id: impl Into<String>, content: VersionContent) -> Self {
        Self {
            id: id.into(),
            metadata: content.metadata,
            phrases: content.phrases,
        }
    }
}

/// Input for adding a new, empty version to a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVersionInput {
    pub name: String,
}

/// A version prepared for editing.
///
/// `base_phrases` is the merged history of every version before this one, so
/// an editor can show inherited translations next to the ones this version
/// defines itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableVersion {
    pub id: String,
    pub metadata: Metadata,
    pub phrases: Phrases,
    pub base_phrases: Phrases,
    pub languages: Vec<String>,
}

/// One row of the translation grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRow {
    pub id: String,
    /// Effective translations after merging history through the version.
    pub translations: Translations,
    /// Languages the version itself defines for this key.
    pub overridden: BTreeSet<String>,
}
