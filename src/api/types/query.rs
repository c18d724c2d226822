//! Query-string extractor whose rejections use the API error body

use std::{fmt, str::FromStr};

use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query as AxumQuery},
    http::request::Parts,
};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};

use super::error::ApiError;

/// Drop-in replacement for `axum::extract::Query`
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        AxumQuery::<T>::from_request_parts(parts, state)
            .await
            .map(|AxumQuery(value)| Query(value))
            .map_err(rejection_to_error)
    }
}

fn rejection_to_error(rejection: QueryRejection) -> ApiError {
    let mut error = ApiError::bad_request(rejection.body_text()).with_code("query_parse_error");
    error.status = rejection.status();
    error
}

/// Reads `?field=` as absent instead of failing to parse the empty string
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
