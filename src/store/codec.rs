//! YAML document codec.
//!
//! A document is a YAML mapping whose `type` field names its [`DocumentKind`];
//! the remaining fields are the payload. Writes are not atomic.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::models::DocumentKind;

const KIND_FIELD: &str = "type";

/// A parsed document whose payload has not been typed yet.
#[derive(Debug, Clone)]
pub struct RawDocument {
    path: PathBuf,
    fields: Mapping,
}

impl RawDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw discriminator, if present and a string.
    pub fn kind_tag(&self) -> Option<&str> {
        self.fields.get(KIND_FIELD).and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        self.kind_tag().and_then(DocumentKind::from_str)
    }

    /// Check the discriminator against `expected` and decode the payload.
    pub fn into_body<T: DeserializeOwned>(self, expected: DocumentKind) -> Result<T> {
        if self.kind() != Some(expected) {
            return Err(Error::InvalidDocumentKind {
                found: self.kind_tag().map(str::to_owned),
                path: self.path,
                expected,
            });
        }

        let Self { path, mut fields } = self;
        fields.remove(KIND_FIELD);
        serde_yaml::from_value(Value::Mapping(fields)).map_err(|e| Error::parse(path, e))
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    #[serde(rename = "type")]
    kind: DocumentKind,
    #[serde(flatten)]
    body: &'a T,
}

pub async fn read_document(path: &Path) -> Result<RawDocument> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::storage(path, e))?;

    let value: Value = serde_yaml::from_str(&contents).map_err(|e| Error::parse(path, e))?;
    match value {
        Value::Mapping(fields) => Ok(RawDocument {
            path: path.to_path_buf(),
            fields,
        }),
        _ => Err(Error::parse(
            path,
            serde::de::Error::custom("document is not a mapping"),
        )),
    }
}

pub async fn write_document<T: Serialize>(path: &Path, kind: DocumentKind, body: &T) -> Result<()> {
    let contents =
        serde_yaml::to_string(&Envelope { kind, body }).map_err(|e| Error::parse(path, e))?;

    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::storage(path, e))
}

pub async fn delete_document(path: &Path) -> Result<()> {
    tokio::fs::remove_file(path)
        .await
        .map_err(|e| Error::storage(path, e))
}
