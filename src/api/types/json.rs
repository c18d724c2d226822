//! JSON extractor/responder whose rejections use the API error body

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::{de::DeserializeOwned, Serialize};

use super::error::ApiError;

/// Drop-in replacement for `axum::Json`
///
/// Body rejections (bad syntax, wrong shape, missing content type) come back
/// as an `ApiError` instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(rejection_to_error)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();

    let (code, message) = match &rejection {
        JsonRejection::JsonDataError(err) => {
            ("json_data_error", format!("Invalid JSON data: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => (
            "json_syntax_error",
            format!("Invalid JSON syntax: {}", err.body_text()),
        ),
        JsonRejection::MissingJsonContentType(_) => (
            "missing_content_type",
            "Missing Content-Type header. Expected 'application/json'.".to_string(),
        ),
        other => ("json_parse_error", other.body_text()),
    };

    let mut error = ApiError::bad_request(message).with_code(code);
    error.status = status;
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct NameBody {
        name: String,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<NameBody, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body)).unwrap();

        Json::<NameBody>::from_request(request, &())
            .await
            .map(|Json(value)| value)
    }

    #[tokio::test]
    async fn test_valid_body() {
        let body = extract(Some("application/json"), r#"{"name":"teamA"}"#)
            .await
            .unwrap();
        assert_eq!(body.name, "teamA");
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let err = extract(Some("application/json"), "{").await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.code.as_deref(), Some("json_syntax_error"));
    }

    #[tokio::test]
    async fn test_wrong_shape() {
        let err = extract(Some("application/json"), r#"{"title":"x"}"#)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.response.error.code.as_deref(), Some("json_data_error"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = extract(None, r#"{"name":"teamA"}"#).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            err.response.error.code.as_deref(),
            Some("missing_content_type")
        );
    }
}
