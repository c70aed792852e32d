//! Request extractors for header-based API versioning.

use axum::{extract::FromRequestParts, http::request::Parts};
use folio_kernel::ApiVersion;

use crate::error::AppError;

/// Name of the request header carrying the API version.
pub const VERSION_HEADER: &str = "version";

/// Detail returned when the `version` header names no supported version.
pub const UNSUPPORTED_VERSION: &str = "Unsupported API version";

/// API version resolved from the required `version` request header.
///
/// Missing header rejects with 422; any value other than `1` or `2` rejects with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionHeader(pub ApiVersion);

impl VersionHeader {
    /// Resolve a version from the raw header value, if one was sent.
    pub fn resolve(raw: Option<&[u8]>) -> Result<ApiVersion, AppError> {
        let raw = raw.ok_or_else(|| AppError::missing_header(VERSION_HEADER))?;
        let value = std::str::from_utf8(raw).map_err(|_| AppError::bad_request(UNSUPPORTED_VERSION))?;

        value.parse::<ApiVersion>().map_err(|err| {
            tracing::debug!(error = %err, "rejecting version header");
            AppError::bad_request(UNSUPPORTED_VERSION)
        })
    }
}

impl<S> FromRequestParts<S> for VersionHeader
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.headers.get(VERSION_HEADER).map(|value| value.as_bytes());
        Self::resolve(raw).map(VersionHeader)
    }
}
