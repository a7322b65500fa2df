//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`. Event counters arrive as raw
//! JSON so that numeric strings and blanks can be coerced by the service.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::Validate;
use volunteer_core::ProfileDetails;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account sign-up request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    /// volunteer (default), participant or admin
    pub role: Option<String>,

    /// Initial role-specific profile fields
    pub profile: Option<ProfileDetails>,

    /// Required when `role` is admin
    pub admin_code: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Event Requests
// ============================================================================

/// Create event request.
///
/// Required text fields are optional here so that every missing one can be
/// reported together.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: Option<String>,
    /// Legacy spelling of `name`; `name` wins when both are sent
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub publish_event: Option<bool>,
    pub points_awarded: Option<Value>,
    pub hours_required: Option<Value>,
    pub participant_limit: Option<Value>,
    pub age_restriction: Option<String>,
    pub contact_information: Option<String>,
    pub event_image: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub skills_needed: Option<Vec<String>>,
}

/// Update event request. Absent and `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    /// Legacy spelling of `name`; `name` wins when both are sent
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub publish_event: Option<bool>,
    pub points_awarded: Option<Value>,
    pub hours_required: Option<Value>,
    pub participant_limit: Option<Value>,
    pub age_restriction: Option<String>,
    pub contact_information: Option<String>,
    pub event_image: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub skills_needed: Option<Vec<String>>,
}

/// Query string of the event listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub include_unpublished: Option<bool>,
}

/// Query flag that is set only by a case-insensitive `true`; any other
/// value, blank included, reads as `false`
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|value| value.trim().eq_ignore_ascii_case("true")))
}

// ============================================================================
// User Requests
// ============================================================================

/// Update own profile request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub profile: Option<ProfileDetails>,
}

/// Query string of the admin user listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
}
