mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::Fixture;
use hoshi::api::create_router;
use hoshi::models::*;

fn setup() -> (Fixture, TestServer) {
    let fixture = Fixture::new();
    fixture.package("core");
    fixture.version("core", "01_initial", "  hello:\n    en: Hello\n");
    fixture.version("core", "02_japanese", "  hello:\n    ja: こんにちは\n");

    let app = create_router(fixture.repo());
    let server = TestServer::new(app).expect("Failed to create test server");
    (fixture, server)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn returns_ok() {
        let (_fixture, server) = setup();

        let response = server.get("/api/v1/health").await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "status": "ok" }));
    }
}

mod project {
    use super::*;

    #[tokio::test]
    async fn returns_header_and_packages() {
        let (_fixture, server) = setup();

        let response = server.get("/api/v1/project").await;

        response.assert_status_ok();
        let summary: ProjectSummary = response.json();
        assert_eq!(summary.project.id, "demo");
        assert_eq!(summary.packages, vec!["core".to_string()]);
    }

    #[tokio::test]
    async fn reports_invalid_project_document() {
        let (fixture, server) = setup();
        fixture.file("project.hoshi", "type: version\n");

        let response = server.get("/api/v1/project").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod packages {
    use super::*;

    #[tokio::test]
    async fn lists_packages() {
        let (fixture, server) = setup();
        fixture.package("app");

        let packages: Vec<String> = server.get("/api/v1/packages").await.json();

        assert_eq!(packages, vec!["app".to_string(), "core".to_string()]);
    }

    #[tokio::test]
    async fn returns_package_summary() {
        let (_fixture, server) = setup();

        let response = server.get("/api/v1/packages/core").await;

        response.assert_status_ok();
        let summary: PackageSummary = response.json();
        assert_eq!(summary.versions.len(), 2);
        assert_eq!(summary.next_version_prefix, "03_");
    }

    #[tokio::test]
    async fn returns_404_for_missing_package() {
        let (_fixture, server) = setup();

        let response = server.get("/api/v1/packages/missing").await;

        response.assert_status_not_found();
    }
}

mod versions {
    use super::*;

    #[tokio::test]
    async fn lists_versions_in_order() {
        let (_fixture, server) = setup();

        let versions: Vec<String> = server.get("/api/v1/packages/core/versions").await.json();

        assert_eq!(versions, vec!["01_initial".to_string(), "02_japanese".to_string()]);
    }

    #[tokio::test]
    async fn returns_a_version() {
        let (_fixture, server) = setup();

        let response = server.get("/api/v1/packages/core/versions/01_initial").await;

        response.assert_status_ok();
        let version: Version = response.json();
        assert_eq!(version.id, "01_initial");
        assert_eq!(version.phrases["hello"]["en"], "Hello");
    }

    #[tokio::test]
    async fn creates_a_version() {
        let (_fixture, server) = setup();

        let response = server
            .post("/api/v1/packages/core/versions")
            .json(&NewVersionInput {
                name: "03_menus".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let version: Version = response.json();
        assert_eq!(version.id, "03_menus");

        let versions: Vec<String> = server.get("/api/v1/packages/core/versions").await.json();
        assert_eq!(versions.len(), 3);
    }

    #[tokio::test]
    async fn refuses_to_create_an_existing_version() {
        let (_fixture, server) = setup();

        let response = server
            .post("/api/v1/packages/core/versions")
            .json(&NewVersionInput {
                name: "01_initial".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn rejects_invalid_names() {
        let (_fixture, server) = setup();

        let response = server
            .post("/api/v1/packages/core/versions")
            .json(&NewVersionInput {
                name: "not valid!".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn updates_a_version() {
        let (_fixture, server) = setup();
        let mut phrases = Phrases::new();
        phrases
            .entry("hello".into())
            .or_default()
            .insert("en".into(), "Hi".into());

        let response = server
            .put("/api/v1/packages/core/versions/01_initial")
            .json(&VersionContent {
                metadata: Metadata::new(),
                phrases,
            })
            .await;

        response.assert_status_ok();
        let stored: Version = server
            .get("/api/v1/packages/core/versions/01_initial")
            .await
            .json();
        assert_eq!(stored.phrases["hello"]["en"], "Hi");
    }

    #[tokio::test]
    async fn update_returns_404_for_missing_version() {
        let (_fixture, server) = setup();

        let response = server
            .put("/api/v1/packages/core/versions/99_missing")
            .json(&VersionContent::default())
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn deletes_a_version() {
        let (_fixture, server) = setup();

        let response = server
            .delete("/api/v1/packages/core/versions/02_japanese")
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server
            .get("/api/v1/packages/core/versions/02_japanese")
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_returns_404_for_missing_version() {
        let (_fixture, server) = setup();

        let response = server
            .delete("/api/v1/packages/core/versions/99_missing")
            .await;

        response.assert_status_not_found();
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn returns_merged_phrases() {
        let (_fixture, server) = setup();

        let response = server
            .get("/api/v1/packages/core/versions/02_japanese/history")
            .await;

        response.assert_status_ok();
        let phrases: Phrases = response.json();
        assert_eq!(phrases["hello"]["en"], "Hello");
        assert_eq!(phrases["hello"]["ja"], "こんにちは");
    }

    #[tokio::test]
    async fn returns_editable_version() {
        let (_fixture, server) = setup();

        let response = server
            .get("/api/v1/packages/core/versions/02_japanese/editable")
            .await;

        response.assert_status_ok();
        let editable: EditableVersion = response.json();
        assert_eq!(editable.base_phrases["hello"]["en"], "Hello");
        assert!(!editable.phrases["hello"].contains_key("en"));
        assert_eq!(editable.languages, vec!["en".to_string(), "ja".to_string()]);
    }

    #[tokio::test]
    async fn returns_translation_rows() {
        let (_fixture, server) = setup();

        let rows: Vec<TranslationRow> = server
            .get("/api/v1/packages/core/versions/02_japanese/rows")
            .await
            .json();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "hello");
        assert_eq!(rows[0].translations.len(), 2);
    }
}
