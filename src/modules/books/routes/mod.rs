//! Book routes mounted under one prefix per version.
//!
//! Every version up to the deployment's latest gets its own `/v{n}` prefix.
//! The unprefixed and `/latest` mounts resolve to the latest version, so a
//! new deployment can repoint them without touching the pinned prefixes.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use folio_http::error::AppError;
use folio_kernel::ApiVersion;
use thiserror::Error;

use super::models::VersionedBook;
use super::store::{BookStore, RecordKey, StoreError};

pub const NOT_FOUND_DETAIL: &str = "Book not found";

/// One prefix under which the book router is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountPoint {
    pub prefix: &'static str,
    pub version: ApiVersion,
}

impl MountPoint {
    /// Route template in OpenAPI notation, e.g. `/v1/books/{book_id}`.
    pub fn path(&self) -> String {
        format!("{}/books/{{book_id}}", self.prefix)
    }
}

/// Mount table for a deployment whose newest version is `latest`.
pub fn mount_points(latest: ApiVersion) -> Vec<MountPoint> {
    let mut mounts: Vec<MountPoint> = latest
        .up_to()
        .map(|version| MountPoint {
            prefix: version.path_prefix(),
            version,
        })
        .collect();

    mounts.push(MountPoint {
        prefix: "",
        version: latest,
    });
    mounts.push(MountPoint {
        prefix: "/latest",
        version: latest,
    });
    mounts
}

#[derive(Debug, Error)]
pub enum BooksError {
    #[error("no book at '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("record '{book_id}' does not match the v{version} book schema: {source}")]
    Schema {
        book_id: String,
        version: ApiVersion,
        source: serde_json::Error,
    },
}

impl From<BooksError> for AppError {
    fn from(err: BooksError) -> Self {
        match err {
            BooksError::NotFound(_) => AppError::not_found(NOT_FOUND_DETAIL),
            other => AppError::Internal(other.into()),
        }
    }
}

#[derive(Clone)]
struct VersionedRoute {
    store: Arc<BookStore>,
    version: ApiVersion,
}

/// Build the full book router for a deployment.
pub fn router(store: Arc<BookStore>, latest: ApiVersion) -> Router {
    mount_points(latest)
        .into_iter()
        .fold(Router::new(), |router, mount| {
            tracing::debug!(
                path = %mount.path(),
                version = %mount.version,
                "mounting book route"
            );
            let versioned = version_router(store.clone(), mount.version);
            if mount.prefix.is_empty() {
                router.merge(versioned)
            } else {
                router.nest(mount.prefix, versioned)
            }
        })
}

fn version_router(store: Arc<BookStore>, version: ApiVersion) -> Router {
    Router::new()
        .route("/books/{book_id}", get(get_book))
        .with_state(VersionedRoute { store, version })
}

async fn get_book(
    State(route): State<VersionedRoute>,
    book_id: Result<Path<String>, PathRejection>,
) -> Result<Json<VersionedBook>, AppError> {
    // An undecodable id cannot name any record
    let Path(book_id) = book_id.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejecting book id");
        AppError::not_found(NOT_FOUND_DETAIL)
    })?;
    let book = find_book(&route.store, route.version, &book_id).await?;
    Ok(Json(book))
}

/// Look up `book_id` in the records of `version` and shape it for that version.
pub async fn find_book(
    store: &BookStore,
    version: ApiVersion,
    book_id: &str,
) -> Result<VersionedBook, BooksError> {
    let key: RecordKey = book_id
        .parse()
        .map_err(|_| BooksError::NotFound(book_id.to_string()))?;

    let record = store
        .fetch(version, key)
        .await?
        .ok_or_else(|| BooksError::NotFound(book_id.to_string()))?;

    tracing::debug!(%version, book_id, "shaping book record");

    VersionedBook::shape(version, record).map_err(|source| BooksError::Schema {
        book_id: book_id.to_string(),
        version,
        source,
    })
}
