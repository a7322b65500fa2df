//! Authentication extractors
//!
//! Read the bearer token from the Authorization header and hand it to the
//! authorization gate. A handler taking one of these only runs once the
//! caller has been resolved to a stored user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use volunteer_service::{AccessLevel, AuthorizationGate, Identity};

use crate::response::ApiError;
use crate::state::AppState;

/// Bearer token of the request, if the header is present and uses the
/// Bearer scheme
async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

async fn authorize<S>(parts: &mut Parts, state: &S, level: AccessLevel) -> Result<Identity, ApiError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    let token = bearer_token(parts, state).await;
    let app_state = AppState::from_ref(state);

    Ok(AuthorizationGate::new(app_state.service_context())
        .authorize(token.as_deref(), level)
        .await?)
}

/// Any authenticated user
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, state, AccessLevel::Authenticated)
            .await
            .map(Self)
    }
}

/// Authenticated user whose stored role is admin
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts, state, AccessLevel::Admin).await.map(Self)
    }
}

/// Optional authenticated user
///
/// Anonymous when the header is absent or the token does not resolve;
/// never rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Identity>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await;
        let app_state = AppState::from_ref(state);

        let identity = AuthorizationGate::new(app_state.service_context())
            .resolve_optional(token.as_deref())
            .await;

        Ok(Self(identity))
    }
}
