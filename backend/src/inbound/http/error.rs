//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the JSON error envelope
//! `{"success": false, "message": ..., "error": <status>}` used by every
//! endpoint, including the 400/404/405 fallbacks.

use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Wire shape of the error envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false` for error responses.
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable failure description.
    #[schema(example = "page not found")]
    pub message: String,
    /// Numeric HTTP status code, duplicated into the body.
    #[schema(example = 404)]
    pub error: u16,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message exposed to clients for a given error.
///
/// Internal messages may carry storage details, so they are replaced with a
/// generic string before serialisation; the original message is logged.
fn client_message(error: &Error) -> String {
    if matches!(error.code(), ErrorCode::InternalError) {
        "internal error".to_owned()
    } else {
        error.message().to_owned()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(message = self.message(), "request failed");
        }
        HttpResponse::build(status).json(ErrorBody {
            success: false,
            message: client_message(self),
            error: status.as_u16(),
        })
    }
}

/// Fallback handler for paths with no registered resource.
pub async fn not_found_fallback() -> ApiResult<HttpResponse> {
    Err(Error::not_found("page not found"))
}

/// Fallback handler for registered paths hit with an unsupported method.
pub async fn method_not_allowed_fallback() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("method not allowed"))
}

/// Translate JSON body extraction failures into the 400 envelope.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    error!(error = %err, "malformed JSON payload");
    Error::bad_request("bad request").into()
}

/// Translate path parameter failures (e.g. a non-numeric category id) into
/// the 404 envelope.
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    error!(error = %err, "path parameter rejected");
    Error::not_found("page not found").into()
}

/// Translate query string failures into the 400 envelope.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    error!(error = %err, "query string rejected");
    Error::bad_request("bad request").into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    async fn body_of(error: Error) -> ErrorBody {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        serde_json::from_slice(&bytes).expect("error envelope")
    }

    #[rstest]
    #[case(Error::bad_request("bad request"), 400)]
    #[case(Error::not_found("page not found"), 404)]
    #[case(Error::method_not_allowed("method not allowed"), 405)]
    #[case(Error::invalid_input("missing fields"), 422)]
    #[case(Error::internal("connection refused"), 500)]
    #[tokio::test]
    async fn envelope_carries_the_status_code(#[case] error: Error, #[case] status: u16) {
        assert_eq!(error.status_code().as_u16(), status);
        let body = body_of(error).await;
        assert!(!body.success);
        assert_eq!(body.error, status);
    }

    #[tokio::test]
    async fn internal_messages_are_redacted() {
        let body = body_of(Error::internal("password=hunter2 leaked")).await;
        assert_eq!(body.message, "internal error");
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let body = body_of(Error::invalid_input("difficulty is required")).await;
        assert_eq!(body.message, "difficulty is required");
    }
}
