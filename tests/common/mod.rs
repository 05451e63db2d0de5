#![allow(dead_code)]

use std::fs;
use std::path::Path;

use hoshi::repository::Repository;
use hoshi::store::ProjectStore;
use tempfile::TempDir;

/// A project directory on disk that lives as long as the fixture.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// A project with no packages.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write(
            dir.path(),
            "project.hoshi",
            "type: project\nid: demo\nmetadata:\n  title: Demo\n",
        );
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> ProjectStore {
        ProjectStore::new(self.root())
    }

    pub fn repo(&self) -> Repository {
        Repository::new(self.store())
    }

    pub fn file(&self, relative: &str, contents: &str) -> &Self {
        write(self.root(), relative, contents);
        self
    }

    pub fn package(&self, id: &str) -> &Self {
        self.file(
            &format!("{id}/package.hoshi"),
            &format!("type: package\nid: {id}\nmetadata:\n  owner: l10n\n"),
        )
    }

    /// A version whose `phrases` block is given as YAML.
    pub fn version(&self, package: &str, id: &str, phrases: &str) -> &Self {
        self.file(
            &format!("{package}/{id}.yaml"),
            &format!("type: version\nmetadata: {{}}\nphrases:\n{phrases}"),
        )
    }
}

pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, contents).expect("Failed to write fixture file");
}
