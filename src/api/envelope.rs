//! Consistent response envelope for all API endpoints.
//!
//! Every response is wrapped in either [`ApiResponse`] (success) or
//! [`ApiErrorResponse`] (error), so clients see one JSON shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::clock::now_ms;

/// Metadata included in every response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Response time, milliseconds since the Unix epoch
    pub generated_at: i64,
    pub version: &'static str,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            generated_at: now_ms(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Successful response: `{ "data": T, "meta": { ... } }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    fn with_status(status: StatusCode, data: T) -> Response {
        let meta = ResponseMeta::now();
        (status, axum::Json(Self { data, meta })).into_response()
    }

    pub fn ok(data: T) -> Response {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Response {
        Self::with_status(StatusCode::CREATED, data)
    }
}

/// Machine-readable error class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    BadRequest,
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Error detail inside [`ApiErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

/// Error response: `{ "error": { "code": "...", "message": "..." }, "meta": { ... } }`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Response {
        let error = ErrorDetail { code, message: message.into() };
        let meta = ResponseMeta::now();
        (code.status(), axum::Json(Self { error, meta })).into_response()
    }

    pub fn not_found(message: impl Into<String>) -> Response {
        Self::with_code(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Response {
        Self::with_code(ErrorCode::BadRequest, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Response {
        Self::with_code(ErrorCode::ServiceUnavailable, message)
    }
}
