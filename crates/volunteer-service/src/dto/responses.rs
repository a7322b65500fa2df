//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use volunteer_core::{EventId, Profile, Role, UserId};

// ============================================================================
// Common Response Types
// ============================================================================

/// Bare confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// User as seen by its owner or an admin. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile: Profile,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,
}

/// Admin user listing
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub count: usize,
}

impl From<Vec<UserResponse>> for UserListResponse {
    fn from(users: Vec<UserResponse>) -> Self {
        Self {
            count: users.len(),
            users,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Sign-up and login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Result of checking a bearer token
#[derive(Debug, Serialize)]
pub struct TokenValidationResponse {
    pub valid: bool,
    pub message: String,
    pub user: UserResponse,
}

// ============================================================================
// Event Responses
// ============================================================================

/// Roster entry
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub user_id: UserId,
    pub role: Role,
    pub registration_date: DateTime<Utc>,
    pub status: String,
}

/// Event with its roster
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub category: String,
    pub status: String,
    pub publish_event: bool,
    pub points_awarded: i32,
    pub hours_required: i32,
    pub participant_limit: i32,
    pub participant_count: usize,
    pub age_restriction: String,
    pub contact_information: String,
    pub event_image: String,
    pub requirements: Vec<String>,
    pub skills_needed: Vec<String>,
    pub participants: Vec<ParticipantResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event listing
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
    pub count: usize,
}

impl From<Vec<EventResponse>> for EventListResponse {
    fn from(events: Vec<EventResponse>) -> Self {
        Self {
            count: events.len(),
            events,
        }
    }
}

/// Result of creating or updating an event
#[derive(Debug, Serialize)]
pub struct EventMutationResponse {
    pub message: String,
    pub event: EventResponse,
}

/// Result of joining an event
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub message: String,
    pub event_id: EventId,
    /// `false` when the roster was updated but the user's profile list was not
    pub profile_synced: bool,
}

/// Result of leaving an event
#[derive(Debug, Serialize)]
pub struct CancellationResponse {
    pub message: String,
    pub event_id: EventId,
}

/// Event roster listing
#[derive(Debug, Serialize)]
pub struct ParticipantListResponse {
    pub participants: Vec<ParticipantResponse>,
    pub count: usize,
}

impl From<Vec<ParticipantResponse>> for ParticipantListResponse {
    fn from(participants: Vec<ParticipantResponse>) -> Self {
        Self {
            count: participants.len(),
            participants,
        }
    }
}

// ============================================================================
// Leaderboard Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub id: UserId,
    pub name: String,
    pub points: i32,
    pub hours_contributed: i32,
    pub events_count: usize,
    pub badges: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub count: usize,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
