//! User handlers
//!
//! The caller's own profile and the admin user directory.

use axum::{extract::State, Json};
use volunteer_core::UserId;
use volunteer_service::dto::{
    EventListResponse, LeaderboardResponse, MessageResponse, UpdateProfileRequest, UserListQuery,
    UserListResponse, UserResponse,
};
use volunteer_service::{LeaderboardService, UserService};

use crate::extractors::{AdminUser, AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

// ============================================================================
// Own profile
// ============================================================================

/// Get the caller's account
///
/// GET /api/users/profile
pub async fn get_profile(AuthUser(identity): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(identity.user))
}

/// Update the caller's editable profile fields
///
/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_profile(identity.user_id, request).await?))
}

/// Events the caller is registered for
///
/// GET /api/users/events
pub async fn my_events(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> ApiResult<Json<EventListResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.my_events(&identity.user).await?))
}

/// Top volunteers by points
///
/// GET /api/users/leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<LeaderboardResponse>> {
    let service = LeaderboardService::new(state.service_context());
    Ok(Json(service.top().await?))
}

// ============================================================================
// Administration
// ============================================================================

/// List users, optionally by role
///
/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<UserListQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_users(query.role.as_deref()).await?))
}

/// Get a user by ID
///
/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(user_id).await?))
}

/// Delete a user
///
/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    service.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
