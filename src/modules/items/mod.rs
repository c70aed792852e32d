//! Header-versioned items endpoint: behavior is chosen by the `version` header.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{response::Redirect, routing::get, Json, Router};
use folio_http::extract::{VersionHeader, VERSION_HEADER};
use folio_kernel::{ApiVersion, InitCtx, Module};
use serde_json::json;

use super::Message;

pub struct ItemsModule;

impl ItemsModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ItemsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for ItemsModule {
    fn name(&self) -> &'static str {
        "items"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            header = VERSION_HEADER,
            "items module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/items/", get(get_items))
            .route("/items", get(|| async { Redirect::temporary("/items/") }))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/items/": {
                    "get": {
                        "summary": "Get items",
                        "tags": ["items"],
                        "parameters": [{
                            "name": VERSION_HEADER,
                            "in": "header",
                            "required": true,
                            "schema": { "type": "string", "enum": ["1", "2"] }
                        }],
                        "responses": {
                            "200": {
                                "description": "Successful Response",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Message" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Unsupported API version",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/HTTPError" }
                                    }
                                }
                            },
                            "422": {
                                "description": "Validation Error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/HTTPError" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
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

async fn get_items(VersionHeader(version): VersionHeader) -> Json<Message> {
    Json(items_message(version))
}

fn items_message(version: ApiVersion) -> Message {
    Message::new(format!("This is version {version} of the API"))
}

pub fn create_module() -> Arc<dyn Module> {
    Arc::new(ItemsModule::new())
}
