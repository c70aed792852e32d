pub mod models;
pub mod routes;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use folio_kernel::{ApiVersion, InitCtx, Module};
use serde_json::json;

use store::BookStore;

/// Books module: one book router mounted under several version prefixes
pub struct BooksModule {
    store: Arc<BookStore>,
    latest: ApiVersion,
}

impl BooksModule {
    pub fn new(data_dir: impl Into<PathBuf>, latest: ApiVersion) -> Self {
        Self {
            store: Arc::new(BookStore::new(data_dir)),
            latest,
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        // Records are read per request; a missing file only fails those requests.
        for version in self.latest.up_to() {
            let source = self.store.source(version);
            if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
                tracing::warn!(
                    module = self.name(),
                    %version,
                    path = %source.display(),
                    "book records file not found"
                );
            }
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            latest = %self.latest,
            data_dir = %self.store.data_dir().display(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone(), self.latest)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut paths = serde_json::Map::new();
        for mount in routes::mount_points(self.latest) {
            let schema = match mount.version {
                ApiVersion::V1 => "BookV1",
                ApiVersion::V2 => "BookV2",
            };
            paths.insert(
                mount.path(),
                json!({
                    "get": {
                        "summary": format!("Get book (version {})", mount.version),
                        "tags": ["books"],
                        "parameters": [{
                            "name": "book_id",
                            "in": "path",
                            "required": true,
                            "description": "Zero-based position of the book record",
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Successful Response",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": format!("#/components/schemas/{schema}") }
                                    }
                                }
                            },
                            "404": {
                                "description": "Not found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/HTTPError" }
                                    }
                                }
                            }
                        }
                    }
                }),
            );
        }

        Some(json!({
            "paths": paths,
            "components": {
                "schemas": {
                    "BookV1": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "author": { "type": "string" }
                        },
                        "required": ["id", "name", "author"]
                    },
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "birthdate": { "type": "string" },
                            "nationality": { "type": "string" }
                        },
                        "required": ["id", "name", "birthdate", "nationality"]
                    },
                    "BookV2": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "author": { "$ref": "#/components/schemas/Author" },
                            "publication_year": { "type": "integer" },
                            "genre": { "type": "string" }
                        },
                        "required": ["id", "name", "author", "publication_year", "genre"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a books module bound to `latest`
pub fn create_module(data_dir: impl Into<PathBuf>, latest: ApiVersion) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(data_dir, latest))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;

    use serde_json::{json, Value};

    pub fn v1_records() -> Value {
        json!([
            {"id": "1", "name": "1984", "author": "George Orwell"},
            {"id": "2", "name": "To Kill a Mockingbird", "author": "Harper Lee"},
            {"id": "3", "name": "The Great Gatsby", "author": "F. Scott Fitzgerald"}
        ])
    }

    pub fn v2_records() -> Value {
        json!([
            {
                "id": "1",
                "name": "1984",
                "author": {"id": "a1", "name": "George Orwell", "birthdate": "1903-06-25", "nationality": "British"},
                "publication_year": 1949,
                "genre": "Dystopian"
            },
            {
                "id": "2",
                "name": "To Kill a Mockingbird",
                "author": {"id": "a2", "name": "Harper Lee", "birthdate": "1926-04-28", "nationality": "American"},
                "publication_year": 1960,
                "genre": "Southern Gothic"
            }
        ])
    }

    /// Write both record files into `dir`
    pub fn write(dir: &Path) {
        std::fs::write(dir.join("books_v1.json"), v1_records().to_string()).unwrap();
        std::fs::write(dir.join("books_v2.json"), v2_records().to_string()).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn get(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn v1_deployment_serves_flat_records_by_position() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write(dir.path());
        let router = BooksModule::new(dir.path(), ApiVersion::V1).routes();

        let stored = fixtures::v1_records();
        for (i, record) in stored.as_array().unwrap().iter().enumerate() {
            let (status, body) = get(&router, &format!("/books/{i}")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["id"], record["id"]);
            assert_eq!(body["name"], record["name"]);
            assert!(body["author"].is_string());
        }
    }

    #[tokio::test]
    async fn v1_deployment_latest_matches_v1() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write(dir.path());
        let router = BooksModule::new(dir.path(), ApiVersion::V1).routes();

        for i in 0..3 {
            let pinned = get(&router, &format!("/v1/books/{i}")).await;
            let latest = get(&router, &format!("/latest/books/{i}")).await;
            assert_eq!(pinned, latest);
        }

        // v2 is not released in this deployment
        let (status, _) = get(&router, "/v2/books/0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn v2_deployment_serves_nested_author() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write(dir.path());
        let router = BooksModule::new(dir.path(), ApiVersion::V2).routes();

        let stored = fixtures::v2_records();
        for (i, record) in stored.as_array().unwrap().iter().enumerate() {
            let (status, body) = get(&router, &format!("/v2/books/{i}")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["author"], record["author"]);
            assert_eq!(body, *record);
        }
    }

    #[tokio::test]
    async fn v2_deployment_repoints_latest_and_root() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write(dir.path());
        let router = BooksModule::new(dir.path(), ApiVersion::V2).routes();

        for i in 0..2 {
            let pinned = get(&router, &format!("/v2/books/{i}")).await;
            assert_eq!(get(&router, &format!("/latest/books/{i}")).await, pinned);
            assert_eq!(get(&router, &format!("/books/{i}")).await, pinned);
        }

        let (status, body) = get(&router, "/v1/books/0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["author"], "George Orwell");
    }

    #[tokio::test]
    async fn unknown_positions_are_structured_404() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write(dir.path());
        let router = BooksModule::new(dir.path(), ApiVersion::V1).routes();

        for uri in [
            "/books/3",
            "/books/99",
            "/books/abc",
            "/books/-1",
            "/books/+1",
            "/books/01",
            // percent-decodes to invalid UTF-8
            "/books/%FF",
        ] {
            let (status, body) = get(&router, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({"detail": "Book not found"}));
        }
    }

    #[tokio::test]
    async fn missing_store_file_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let router = BooksModule::new(dir.path(), ApiVersion::V1).routes();

        let (status, body) = get(&router, "/books/0").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write(dir.path());
        let router = BooksModule::new(dir.path(), ApiVersion::V2).routes();

        let first = get(&router, "/books/1").await;
        let second = get(&router, "/books/1").await;
        assert_eq!(first, second);
    }

    #[test]
    fn openapi_lists_every_mount() {
        let module = BooksModule::new("data", ApiVersion::V2);
        let doc = module.openapi().unwrap();
        let paths = doc["paths"].as_object().unwrap();

        for path in [
            "/books/{book_id}",
            "/v1/books/{book_id}",
            "/v2/books/{book_id}",
            "/latest/books/{book_id}",
        ] {
            assert!(paths.contains_key(path), "{path}");
        }
        assert_eq!(
            doc["paths"]["/v1/books/{book_id}"]["get"]["responses"]["200"]["content"]
                ["application/json"]["schema"]["$ref"],
            "#/components/schemas/BookV1"
        );
    }
}
