use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use model_runtime::{ImageInputError, RuntimeError};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    #[serde(rename = "type")]
    error_type: &'static str,
    code: &'a str,
    message: &'a str,
}

pub const HEADER_X_MULTITASK_ERROR_CODE: &str = "X-Multitask-Error-Code";

/// Longest slice of a worker error body echoed back to clients.
const MAX_UPSTREAM_BODY_PREVIEW: usize = 200;

pub fn internal_error(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::INTERNAL_SERVER_ERROR, code, message)
}

pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::BAD_REQUEST, code, message)
}

pub fn bad_gateway(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::BAD_GATEWAY, code, message)
}

pub fn gateway_timeout(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::GATEWAY_TIMEOUT, code, message)
}

pub fn create_error(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    let code_str = code.into();
    let message_str = message.into();

    let mut headers = HeaderMap::with_capacity(1);
    if let Ok(val) = HeaderValue::from_str(&code_str) {
        headers.insert(HEADER_X_MULTITASK_ERROR_CODE, val);
    }

    (
        status,
        headers,
        Json(ErrorResponse {
            error: ErrorDetail {
                error_type: status_code_to_str(status),
                code: &code_str,
                message: &message_str,
            },
        }),
    )
        .into_response()
}

fn status_code_to_str(status_code: StatusCode) -> &'static str {
    status_code
        .canonical_reason()
        .unwrap_or("Unknown Status Code")
}

pub fn extract_error_code_from_response<B>(response: &Response<B>) -> &str {
    response
        .headers()
        .get(HEADER_X_MULTITASK_ERROR_CODE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Failures of a generation request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageInputError),

    #[error("Model runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable code reported in the error body and header.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidImage(_) => "invalid_image",
            ServiceError::Runtime(e) if e.is_timeout() => "upstream_timeout",
            ServiceError::Runtime(_) => "upstream_error",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let code = self.code();
        match &self {
            ServiceError::InvalidImage(e) => bad_request(code, e.to_string()),
            ServiceError::Runtime(e) if e.is_timeout() => {
                gateway_timeout(code, format!("Model worker timed out: {}", e))
            }
            ServiceError::Runtime(RuntimeError::Status { status, body }) => {
                let preview: String = body.chars().take(MAX_UPSTREAM_BODY_PREVIEW).collect();
                bad_gateway(code, format!("Model worker returned {}: {}", status, preview))
            }
            ServiceError::Runtime(e) => bad_gateway(code, e.to_string()),
            ServiceError::Internal(message) => internal_error(code, message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_error_envelope() {
        let response = bad_request("invalid_image", "not a png");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(extract_error_code_from_response(&response), "invalid_image");

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "Bad Request");
        assert_eq!(body["error"]["code"], "invalid_image");
        assert_eq!(body["error"]["message"], "not a png");
    }

    #[tokio::test]
    async fn test_runtime_status_maps_to_bad_gateway() {
        let error = ServiceError::Runtime(RuntimeError::Status {
            status: 500,
            body: "x".repeat(1000),
        });
        assert_eq!(error.code(), "upstream_error");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Model worker returned 500: "));
        assert!(message.len() < 300);
    }

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let error = ServiceError::Runtime(RuntimeError::Timeout {
            url: "http://worker/generate".into(),
        });
        assert_eq!(error.code(), "upstream_timeout");
        assert_eq!(error.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_internal_error() {
        let response = ServiceError::Internal("join failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(extract_error_code_from_response(&response), "internal_error");
    }
}
