//! User service
//!
//! Own-profile operations and user administration.

use tracing::{info, instrument};
use volunteer_core::{DomainError, Role, User, UserId};

use crate::dto::{EventListResponse, EventResponse, UpdateProfileRequest, UserListResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn find(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        Ok(UserResponse::from(self.find(user_id).await?))
    }

    /// Merge editable profile fields for the given user.
    ///
    /// Event lists and earned counters cannot be changed here.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let details = request
            .profile
            .ok_or_else(|| ServiceError::validation("profile is required"))?;

        let mut user = self.find(user_id).await?;
        user.update_profile(details);
        self.ctx.user_repo().update_profile(user_id, &user.profile).await?;

        info!(user_id = %user_id, "User profile updated");

        // Re-read so the response shows event lists as stored
        self.get_user(user_id).await
    }

    /// Events referenced by the user's profile that still exist
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn my_events(&self, user: &User) -> ServiceResult<EventListResponse> {
        let events = self
            .ctx
            .event_repo()
            .find_by_ids(user.profile.event_ids())
            .await?;

        Ok(events
            .iter()
            .map(EventResponse::from)
            .collect::<Vec<_>>()
            .into())
    }

    /// List users, optionally filtered by role name
    #[instrument(skip(self))]
    pub async fn list_users(&self, role: Option<&str>) -> ServiceResult<UserListResponse> {
        let role = match role.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<Role>()
                    .map_err(|_| DomainError::InvalidRole(raw.to_string()))?,
            ),
        };

        let users = self.ctx.user_repo().list(role).await?;

        Ok(users
            .iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>()
            .into())
    }

    /// Hard delete a user. Outstanding tokens stop resolving immediately;
    /// event rosters keep their entries.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: UserId) -> ServiceResult<()> {
        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, "User account deleted");

        Ok(())
    }
}
