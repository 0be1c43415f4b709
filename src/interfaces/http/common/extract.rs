//! Path and query extractors that reject through `ApiError`
//!
//! Thin wrappers over `axum::extract::{Path, Query}` so an unparsable id or
//! a missing query parameter answers with the usual `ApiResponse` body
//! (400) instead of axum's plain-text rejection.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::ApiError;
use crate::domain::DomainError;

/// `Path<T>` with a JSON `BadRequest` rejection
pub struct ApiPath<T>(pub T);

/// `Query<T>` with a JSON `BadRequest` rejection
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError(DomainError::BadRequest(rejection.body_text())))?;
        Ok(ApiPath(value))
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError(DomainError::BadRequest(rejection.body_text())))?;
        Ok(ApiQuery(value))
    }
}
