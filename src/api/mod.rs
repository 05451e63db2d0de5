mod handlers;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::repository::Repository;

pub fn create_router(repo: Repository) -> Router {
    let api = Router::new()
        // Project
        .route("/project", get(handlers::get_project))
        // Packages
        .route("/packages", get(handlers::list_packages))
        .route("/packages/{package}", get(handlers::get_package))
        // Versions
        .route(
            "/packages/{package}/versions",
            get(handlers::list_versions).post(handlers::create_version),
        )
        .route(
            "/packages/{package}/versions/{version}",
            get(handlers::get_version)
                .put(handlers::update_version)
                .delete(handlers::delete_version),
        )
        .route(
            "/packages/{package}/versions/{version}/history",
            get(handlers::get_history),
        )
        .route(
            "/packages/{package}/versions/{version}/editable",
            get(handlers::get_editable_version),
        )
        .route(
            "/packages/{package}/versions/{version}/rows",
            get(handlers::get_translation_rows),
        )
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(repo)
}
