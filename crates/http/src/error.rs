//! Error handling for the Folio HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Error body returned for every 4xx/5xx response.
///
/// `detail` is a message string, or a list of field errors for validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("method not allowed: {message}")]
    MethodNotAllowed { message: String, code: String },

    #[error("request timeout: {message}")]
    Timeout { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Validation error for a required request header that was not sent
    pub fn missing_header(name: &str) -> Self {
        Self::validation(
            vec![json!({
                "type": "missing",
                "loc": ["header", name],
                "msg": "Field required",
                "input": null
            })],
            format!("missing required header '{name}'"),
        )
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Route exists but does not accept the request method
    pub fn method_not_allowed() -> Self {
        Self::MethodNotAllowed {
            message: "Method Not Allowed".to_string(),
            code: "method_not_allowed".to_string(),
        }
    }

    /// Request exceeded the configured server timeout
    pub fn timeout() -> Self {
        Self::Timeout {
            message: "Request Timeout".to_string(),
            code: "request_timeout".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        let (error_code, message, detail) = match self {
            AppError::Validation {
                details,
                code,
                message,
            } => (code, message, serde_json::Value::Array(details)),
            AppError::NotFound { message, code }
            | AppError::BadRequest { message, code }
            | AppError::MethodNotAllowed { message, code }
            | AppError::Timeout { message, code } => {
                (code, message.clone(), json!(message))
            }
            AppError::Internal(e) => {
                let message = format!("{e:#}");
                ("internal_error".to_string(), message.clone(), json!(message))
            }
        };

        tracing::error!(
            error_id = %error_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            %message,
            "Request error"
        );

        // Internal details stay in the log for release builds
        let detail = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            json!("Internal Server Error")
        } else {
            detail
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
