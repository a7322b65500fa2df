//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every mutation that touches a roster or a
//! profile event list must be a single atomic update of one record.

use async_trait::async_trait;

use crate::entities::{Event, Participant, Profile, User};
use crate::error::DomainError;
use crate::value_objects::{EventId, Role, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Store the editable part of a profile without touching event lists
    /// or earned counters
    async fn update_profile(&self, id: UserId, profile: &Profile) -> RepoResult<()>;

    /// List users, optionally restricted to one role
    async fn list(&self, role: Option<Role>) -> RepoResult<Vec<User>>;

    /// Volunteers ordered by points (highest first)
    async fn top_volunteers(&self, limit: i64) -> RepoResult<Vec<User>>;

    /// Hard delete a user
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Record a successful sign-in
    async fn touch_last_login(&self, id: UserId) -> RepoResult<()>;

    /// Record an authenticated request
    async fn touch_last_access(&self, id: UserId) -> RepoResult<()>;

    /// Add an event id to the role-appropriate profile list (set semantics)
    async fn link_event(&self, id: UserId, role: Role, event_id: EventId) -> RepoResult<()>;

    /// Remove an event id from every profile event list
    async fn unlink_event(&self, id: UserId, event_id: EventId) -> RepoResult<()>;
}

// ============================================================================
// Event Repository
// ============================================================================

/// Filters for event listings
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    /// Exclude events with `publish_event = false`
    pub published_only: bool,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>>;

    /// Find several events; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[EventId]) -> RepoResult<Vec<Event>>;

    /// List events matching the query, ordered by start date
    async fn list(&self, query: &EventQuery) -> RepoResult<Vec<Event>>;

    /// Create a new event
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Update every descriptive field of an event. The roster is left
    /// untouched.
    async fn update(&self, event: &Event) -> RepoResult<()>;

    /// Hard delete an event
    async fn delete(&self, id: EventId) -> RepoResult<()>;

    /// Atomically append a participant.
    ///
    /// Fails with `AlreadyRegistered` if the user is already on the roster,
    /// `EventFull` if a positive limit has been reached and
    /// `EventNotFound` if the event does not exist.
    async fn add_participant(&self, id: EventId, participant: &Participant) -> RepoResult<()>;

    /// Atomically remove a participant. Returns whether an entry was removed.
    async fn remove_participant(&self, id: EventId, user_id: UserId) -> RepoResult<bool>;
}
