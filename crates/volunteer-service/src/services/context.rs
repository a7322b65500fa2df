//! Service context - dependency container for services
//!
//! Holds the repositories, the token service and the credential store.

use std::sync::Arc;

use volunteer_common::{CredentialStore, TokenService};
use volunteer_core::{EventRepository, UserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every service borrows it for the duration of one call.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    event_repo: Arc<dyn EventRepository>,

    // Services
    token_service: Arc<TokenService>,
    credentials: CredentialStore,

    // Sign-up policy
    admin_access_code: Option<String>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        event_repo: Arc<dyn EventRepository>,
        token_service: Arc<TokenService>,
        credentials: CredentialStore,
        admin_access_code: Option<String>,
    ) -> Self {
        Self {
            user_repo,
            event_repo,
            token_service,
            credentials,
            admin_access_code,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    // === Services ===

    /// Get the token service
    pub fn token_service(&self) -> &TokenService {
        self.token_service.as_ref()
    }

    /// Get the credential store
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Code required to sign up as an admin; `None` disables admin sign-up
    pub fn admin_access_code(&self) -> Option<&str> {
        self.admin_access_code.as_deref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("token_service", &self.token_service)
            .field("admin_signup", &self.admin_access_code.is_some())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    token_service: Option<Arc<TokenService>>,
    credentials: Option<CredentialStore>,
    admin_access_code: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn token_service(mut self, service: Arc<TokenService>) -> Self {
        self.token_service = Some(service);
        self
    }

    pub fn credentials(mut self, store: CredentialStore) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Blank codes are treated as unset
    pub fn admin_access_code(mut self, code: Option<String>) -> Self {
        self.admin_access_code = code.filter(|c| !c.trim().is_empty());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.event_repo
                .ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            self.token_service
                .ok_or_else(|| ServiceError::validation("token_service is required"))?,
            self.credentials.unwrap_or_default(),
            self.admin_access_code,
        ))
    }
}
