//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{EventId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Registration Rule Violations
    // =========================================================================
    #[error("User already registered for this event")]
    AlreadyRegistered,

    #[error("Event has reached its participant limit")]
    EventFull,

    #[error("Event is not published")]
    EventNotPublished,

    #[error("User is not registered for this event")]
    NotRegistered,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingFields(_) => "MISSING_FIELDS",
            Self::InvalidRole(_) => "INVALID_ROLE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Registration
            Self::AlreadyRegistered => "DUPLICATE_REGISTRATION",
            Self::EventFull => "EVENT_FULL",
            Self::EventNotPublished => "EVENT_NOT_PUBLISHED",
            Self::NotRegistered => "NOT_REGISTERED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::EventNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::MissingFields(_) | Self::InvalidRole(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// Check if this is a rejected registration or cancellation.
    /// These are client errors reported as bad requests.
    pub fn is_registration_rule(&self) -> bool {
        matches!(
            self,
            Self::AlreadyRegistered | Self::EventFull | Self::EventNotPublished | Self::NotRegistered
        )
    }
}
