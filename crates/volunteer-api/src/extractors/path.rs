//! Path parameter extractors
//!
//! Type-safe extraction of resource ids from path parameters. An id that
//! does not parse cannot name an existing resource, so it is reported as
//! not found rather than as a bad request.

use std::str::FromStr;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use volunteer_core::{EventId, UserId};

use crate::response::ApiError;

/// An id type addressable from a URL path
pub trait PathId: FromStr {
    /// Resource name used in not-found messages
    const RESOURCE: &'static str;
}

impl PathId for EventId {
    const RESOURCE: &'static str = "Event";
}

impl PathId for UserId {
    const RESOURCE: &'static str = "User";
}

/// Extract a single id from the path
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: PathId + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound(T::RESOURCE))?;

        raw.parse::<T>()
            .map(IdPath)
            .map_err(|_| ApiError::NotFound(T::RESOURCE))
    }
}
