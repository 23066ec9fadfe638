//! Query-string parameter extractor
//!
//! Deserializes an endpoint's parameter schema from the query string and
//! runs its `validator` rules. Any failure becomes `InvalidRequest`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// Validated query parameters
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_request(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;

        Ok(Params(value))
    }
}
