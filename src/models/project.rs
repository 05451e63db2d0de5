use serde::{Deserialize, Serialize};

use super::document::null_as_default;
use super::Metadata;

/// The root of a localization repository.
///
/// Exactly one project document lives at the root directory. Projects are
/// discovered, never written, by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

/// A project together with its package ids, sorted, for the project pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub packages: Vec<String>,
}
