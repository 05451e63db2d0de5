use serde::{Deserialize, Serialize};

use super::Metadata;

/// A named subdivision of a project.
///
/// The id is the package's directory name; any `id` stored inside the package
/// document is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub metadata: Metadata,
}

/// A package with its ordered version ids, used for the package pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSummary {
    #[serde(flatten)]
    pub package: Package,
    pub versions: Vec<String>,
    /// Suggested prefix for the next version name (e.g. `03_`).
    pub next_version_prefix: String,
}
