//! Path and query extraction with 400 rejections in the API error format.

use crate::accession::ProteinAccession;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Like `Path<T>`, rejecting with `AppError::BadRequest`.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(ApiPath(value))
    }
}

/// Like `Query<T>`, rejecting with `AppError::BadRequest`.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(ApiQuery(value))
    }
}

/// The `{mgyp}` path segment decoded into a protein accession.
#[derive(Debug, Clone, Copy)]
pub struct Mgyp(pub ProteinAccession);

#[async_trait]
impl<S> FromRequestParts<S> for Mgyp
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segments) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let raw = segments
            .get("mgyp")
            .ok_or_else(|| AppError::BadRequest("missing protein accession".into()))?;
        Ok(Mgyp(raw.parse()?))
    }
}
