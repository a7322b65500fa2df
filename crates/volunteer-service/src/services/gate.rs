//! Authorization gate
//!
//! Turns the bearer token of a request into a resolved identity, or rejects
//! the request before any handler logic runs. The role is always taken from
//! the stored user, never from the token, so a deleted user's tokens stop
//! working immediately.

use tracing::{debug, instrument, warn};
use volunteer_common::AppError;
use volunteer_core::{Role, User, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Capability a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Valid token for an existing user
    Authenticated,
    /// Authenticated and the stored role is admin
    Admin,
}

/// Caller resolved from a verified token
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
    pub user: User,
}

impl Identity {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authorization gate
pub struct AuthorizationGate<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationGate<'a> {
    /// Create a new AuthorizationGate
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve `token` and check it grants `level`.
    ///
    /// Errors, in the order they are checked: `MissingAuth`, `TokenExpired`
    /// or `InvalidToken`, `UnknownSubject`, `InsufficientPermissions`.
    #[instrument(skip(self, token))]
    pub async fn authorize(&self, token: Option<&str>, level: AccessLevel) -> ServiceResult<Identity> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingAuth)?;

        let claims = self.ctx.token_service().verify(token).inspect_err(|e| {
            debug!(error = %e, "Rejected bearer token");
        })?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Token subject no longer exists");
                AppError::UnknownSubject
            })?;

        if level == AccessLevel::Admin && !user.is_admin() {
            warn!(user_id = %user_id, role = %user.role, "Admin route refused");
            return Err(AppError::InsufficientPermissions.into());
        }

        if let Err(e) = self.ctx.user_repo().touch_last_access(user_id).await {
            warn!(user_id = %user_id, error = %e, "Failed to record last access");
        }

        Ok(Identity {
            user_id,
            role: user.role,
            user,
        })
    }

    /// Resolve an identity if the token is usable; anonymous otherwise
    pub async fn resolve_optional(&self, token: Option<&str>) -> Option<Identity> {
        token?;
        self.authorize(token, AccessLevel::Authenticated).await.ok()
    }
}
