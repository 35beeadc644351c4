// Validated JSON extractor for gateway request bodies
//
// Deserializes the body, applies `Normalizable::normalize`, then runs the
// validator crate's `Validate` checks before the handler sees the value.

/// Trait for request types that need post-deserialization normalization
pub trait Normalizable {
    /// Normalize the request in place before validation
    fn normalize(&mut self) {
        // Default: no-op
    }
}

#[cfg(feature = "axum")]
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(feature = "axum")]
use serde::de::DeserializeOwned;
#[cfg(feature = "axum")]
use serde_json::json;
#[cfg(feature = "axum")]
use validator::Validate;

/// JSON extractor that normalizes and validates the request body.
///
/// Failures become a 400 with an `{"error": {type, code, message}}` body, the
/// same envelope the gateway uses for its own errors.
///
/// ```rust,ignore
/// async fn generate_code(
///     ValidatedJson(request): ValidatedJson<CodeGenerationRequest>,
/// ) -> Response {
///     // request is normalized and within bounds here
/// }
/// ```
#[cfg(feature = "axum")]
pub struct ValidatedJson<T>(pub T);

#[cfg(feature = "axum")]
fn rejection(code: &str, message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": {
                "type": "invalid_request_error",
                "code": code,
                "message": message,
            }
        })),
    )
        .into_response()
}

#[cfg(feature = "axum")]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalizable + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut data) =
            Json::<T>::from_request(req, state)
                .await
                .map_err(|err: JsonRejection| {
                    let message = match err {
                        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {e}"),
                        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {e}"),
                        JsonRejection::MissingJsonContentType(_) => {
                            "Missing Content-Type: application/json header".to_string()
                        }
                        _ => format!("Failed to parse JSON: {err}"),
                    };
                    rejection("json_parse_error", message)
                })?;

        data.normalize();

        data.validate()
            .map_err(|errors| rejection("validation_error", errors.to_string()))?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(feature = "axum")]
impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use axum::{body::Body, http, http::header};
    use serde::Deserialize;

    use super::*;
    use crate::api::CodeGenerationRequest;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1))]
        name: String,
    }

    impl Normalizable for Probe {
        fn normalize(&mut self) {
            self.name = self.name.trim().to_string();
        }
    }

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let ValidatedJson(request) = ValidatedJson::<CodeGenerationRequest>::from_request(
            json_request(r#"{"prompt": "sort a dict", "top_p": 0.5}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(request.prompt, "sort a dict");
        assert_eq!(request.params().top_p, 0.5);
    }

    #[tokio::test]
    async fn test_out_of_range_body_is_rejected() {
        let result = ValidatedJson::<CodeGenerationRequest>::from_request(
            json_request(r#"{"prompt": "x", "top_p": 3.0}"#),
            &(),
        )
        .await;
        let response = result.err().unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_normalize_runs_before_validate() {
        let result =
            ValidatedJson::<Probe>::from_request(json_request(r#"{"name": "   "}"#), &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_syntax_error_is_rejected() {
        let result =
            ValidatedJson::<CodeGenerationRequest>::from_request(json_request("{"), &()).await;
        let response = result.err().unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
