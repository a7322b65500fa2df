//! Authentication service
//!
//! Handles account sign-up, login and token validation.

use chrono::Utc;
use subtle::ConstantTimeEq;
use tracing::{info, instrument, warn};
use volunteer_common::AppError;
use volunteer_core::{DomainError, Role, User, UserId};

use crate::dto::{
    AuthResponse, LoginRequest, RegisterRequest, TokenValidationResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::gate::Identity;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and sign it in
    #[instrument(skip(self, request), fields(email = %request.email, role = ?request.role))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let role = match request.role.as_deref().map(str::trim) {
            None | Some("") => Role::default(),
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|_| DomainError::InvalidRole(raw.to_string()))?,
        };

        if role.is_admin() {
            self.check_admin_code(request.admin_code.as_deref())?;
        }

        let email = request.email.trim().to_string();
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.credentials().hash(&request.password)?;

        let mut user = User::new(
            UserId::generate(),
            request.name.trim().to_string(),
            email,
            role,
            request.profile.unwrap_or_default(),
        );
        user.last_login = Some(Utc::now());

        // The unique index still catches a concurrent sign-up with the same email
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, role = %role, "User registered successfully");

        self.signed_in("User registered successfully", &user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        if !self.ctx.credentials().verify(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        self.ctx.user_repo().touch_last_login(user.id).await?;
        user.last_login = Some(Utc::now());

        info!(user_id = %user.id, "User logged in successfully");

        self.signed_in("Login successful", &user)
    }

    /// Describe the identity the gate resolved from a token
    pub fn validate(&self, identity: &Identity) -> TokenValidationResponse {
        TokenValidationResponse {
            valid: true,
            message: "Token is valid".to_string(),
            user: UserResponse::from(&identity.user),
        }
    }

    fn check_admin_code(&self, supplied: Option<&str>) -> ServiceResult<()> {
        let Some(expected) = self.ctx.admin_access_code() else {
            warn!("Admin sign-up attempted while disabled");
            return Err(ServiceError::forbidden("Admin registration is disabled"));
        };
        let matches =
            supplied.is_some_and(|code| bool::from(code.as_bytes().ct_eq(expected.as_bytes())));
        if !matches {
            warn!("Admin sign-up attempted with a wrong access code");
            return Err(ServiceError::forbidden("Invalid admin access code"));
        }
        Ok(())
    }

    fn signed_in(&self, message: &str, user: &User) -> ServiceResult<AuthResponse> {
        let issued = self.ctx.token_service().issue(user.id, user.role)?;
        Ok(AuthResponse {
            message: message.to_string(),
            user: UserResponse::from(user),
            token: issued.token,
            token_type: issued.token_type,
            expires_in: issued.expires_in,
        })
    }
}
