//! Authentication handlers
//!
//! Endpoints for sign-up, sign-in and token validation.

use axum::{extract::State, Json};
use volunteer_service::dto::{AuthResponse, LoginRequest, RegisterRequest, TokenValidationResponse};
use volunteer_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new account
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Check the caller's token
///
/// GET /api/auth/validate-token
pub async fn validate_token(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Json<TokenValidationResponse> {
    Json(AuthService::new(state.service_context()).validate(&identity))
}
