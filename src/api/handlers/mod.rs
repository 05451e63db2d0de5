use std::io::ErrorKind;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::Error;
use crate::models::*;
use crate::repository::Repository;

type ApiResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

/// Map a store error to a status and message.
///
/// Missing things, bad ids and conflicts are the caller's problem and are
/// returned as-is. Malformed documents are reported as unprocessable. Anything
/// else is logged in full and hidden behind a generic message.
fn store_error(e: Error) -> (StatusCode, String) {
    let msg = e.to_string();

    let status = match &e {
        Error::VersionNotFound { .. } => StatusCode::NOT_FOUND,
        Error::Storage { source, .. } if source.kind() == ErrorKind::NotFound => {
            StatusCode::NOT_FOUND
        }
        Error::InvalidPackageId(_) | Error::InvalidVersionId(_) => StatusCode::BAD_REQUEST,
        Error::VersionExists { .. } => StatusCode::CONFLICT,
        Error::InvalidDocumentKind { .. } | Error::Parse { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Error::Storage { .. } => {
            tracing::error!("Internal error: {}", msg);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            );
        }
    };

    tracing::warn!("Request failed: {}", msg);
    (status, msg)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Project & Packages
// ============================================================

pub async fn get_project(State(repo): State<Repository>) -> ApiResult<Json<ProjectSummary>> {
    repo.project_summary().await.map(Json).map_err(store_error)
}

pub async fn list_packages(State(repo): State<Repository>) -> ApiResult<Json<Vec<String>>> {
    repo.list_packages().await.map(Json).map_err(store_error)
}

pub async fn get_package(
    State(repo): State<Repository>,
    Path(package_id): Path<String>,
) -> ApiResult<Json<PackageSummary>> {
    repo.package_summary(&package_id)
        .await
        .map(Json)
        .map_err(store_error)
}

// ============================================================
// Versions
// ============================================================

pub async fn list_versions(
    State(repo): State<Repository>,
    Path(package_id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    repo.list_versions(&package_id)
        .await
        .map(Json)
        .map_err(store_error)
}

pub async fn create_version(
    State(repo): State<Repository>,
    Path(package_id): Path<String>,
    Json(input): Json<NewVersionInput>,
) -> ApiResult<(StatusCode, Json<Version>)> {
    repo.add_new_version(&package_id, &input.name)
        .await
        .map(|v| (StatusCode::CREATED, Json(v)))
        .map_err(store_error)
}

pub async fn get_version(
    State(repo): State<Repository>,
    Path((package_id, version_id)): Path<(String, String)>,
) -> ApiResult<Json<Version>> {
    repo.fetch_version(&package_id, &version_id)
        .await
        .map(Json)
        .map_err(store_error)
}

pub async fn update_version(
    State(repo): State<Repository>,
    Path((package_id, version_id)): Path<(String, String)>,
    Json(content): Json<VersionContent>,
) -> ApiResult<Json<Version>> {
    repo.update_version(&package_id, &version_id, content)
        .await
        .map(Json)
        .map_err(store_error)
}

pub async fn delete_version(
    State(repo): State<Repository>,
    Path((package_id, version_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    repo.delete_version(&package_id, &version_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(store_error)
}

pub async fn get_history(
    State(repo): State<Repository>,
    Path((package_id, version_id)): Path<(String, String)>,
) -> ApiResult<Json<Phrases>> {
    repo.history(&package_id, &version_id)
        .await
        .map(Json)
        .map_err(store_error)
}

pub async fn get_editable_version(
    State(repo): State<Repository>,
    Path((package_id, version_id)): Path<(String, String)>,
) -> ApiResult<Json<EditableVersion>> {
    repo.fetch_editable_version(&package_id, &version_id)
        .await
        .map(Json)
        .map_err(store_error)
}

pub async fn get_translation_rows(
    State(repo): State<Repository>,
    Path((package_id, version_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<TranslationRow>>> {
    repo.translation_rows(&package_id, &version_id)
        .await
        .map(Json)
        .map_err(store_error)
}
