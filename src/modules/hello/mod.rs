//! URL-versioned greeting: the version is a literal path segment.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Json, Router};
use folio_kernel::{ApiVersion, InitCtx, Module};
use serde_json::json;

use super::Message;

pub struct HelloModule;

impl HelloModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HelloModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for HelloModule {
    fn name(&self) -> &'static str {
        "hello"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "hello module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        ApiVersion::ALL
            .into_iter()
            .fold(Router::new(), |router, version| {
                router.route(
                    &hello_path(version),
                    get(move || async move { Json(greeting(version)) }),
                )
            })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let mut paths = serde_json::Map::new();
        for version in ApiVersion::ALL {
            paths.insert(
                hello_path(version),
                json!({
                    "get": {
                        "summary": format!("Hello (version {version})"),
                        "tags": ["hello"],
                        "responses": {
                            "200": {
                                "description": "Successful Response",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
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
                    "Message": {
                        "type": "object",
                        "properties": { "message": { "type": "string" } },
                        "required": ["message"]
                    }
                }
            }
        }))
    }
}

fn hello_path(version: ApiVersion) -> String {
    format!("{}/hello", version.path_prefix())
}

fn greeting(version: ApiVersion) -> Message {
    Message::new(format!("Hello, World! This is version {version}"))
}

pub fn create_module() -> Arc<dyn Module> {
    Arc::new(HelloModule::new())
}
