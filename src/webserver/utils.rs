/// Response helpers shared by route handlers
use crate::errors::ScanError;
use crate::webserver::models::{ErrorDetails, ErrorResponse};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 200 with a JSON body
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Structured error body with the given status
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<String>,
) -> Response {
    let body = ErrorResponse {
        error: ErrorDetails {
            code: code.to_string(),
            message: message.to_string(),
            details,
            timestamp: chrono::Utc::now(),
        },
    };
    (status, Json(body)).into_response()
}

pub fn status_for_scan_error(err: &ScanError) -> StatusCode {
    match err {
        ScanError::Transport(_) => StatusCode::BAD_GATEWAY,
        ScanError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ScanError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Seconds a client should wait before retrying a recoverable failure
const RETRY_AFTER_SECS: &str = "5";

pub fn scan_error_response(err: &ScanError) -> Response {
    let mut response = error_response(
        status_for_scan_error(err),
        err.error_code(),
        &err.user_message(),
        Some(err.to_string()),
    );
    if err.is_recoverable() {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
    }
    response
}
