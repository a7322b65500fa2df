//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs and
//! `TryFrom` conversions from event request bodies to domain input.

use volunteer_core::{
    coerce_count, DomainError, Event, EventPatch, NewEvent, Participant, Profile, User,
};

use super::requests::{CreateEventRequest, UpdateEventRequest};
use super::responses::{EventResponse, LeaderboardEntry, ParticipantResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            profile: user.profile.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login: user.last_login,
            last_access: user.last_access,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl LeaderboardEntry {
    /// Leaderboard row for a user at 1-based `rank`
    pub fn ranked(rank: usize, user: &User) -> Self {
        let (points, hours_contributed, badges) = match &user.profile {
            Profile::Volunteer(v) => (v.points, v.hours_contributed, v.badges.clone()),
            Profile::Participant(_) | Profile::Admin(_) => (0, 0, Vec::new()),
        };
        Self {
            rank,
            id: user.id,
            name: user.name.clone(),
            points,
            hours_contributed,
            events_count: user.profile.event_ids().len(),
            badges,
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&Participant> for ParticipantResponse {
    fn from(p: &Participant) -> Self {
        Self {
            user_id: p.user_id,
            role: p.role,
            registration_date: p.registration_date,
            status: p.status.clone(),
        }
    }
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            description: event.description.clone(),
            start_date: event.start_date.clone(),
            end_date: event.end_date.clone(),
            location: event.location.clone(),
            category: event.category.clone(),
            status: event.status.clone(),
            publish_event: event.publish_event,
            points_awarded: event.points_awarded,
            hours_required: event.hours_required,
            participant_limit: event.participant_limit,
            participant_count: event.participant_count(),
            age_restriction: event.age_restriction.clone(),
            contact_information: event.contact_information.clone(),
            event_image: event.event_image.clone(),
            requirements: event.requirements.clone(),
            skills_needed: event.skills_needed.clone(),
            participants: event.participants.iter().map(ParticipantResponse::from).collect(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}

// ============================================================================
// Request Mappers
// ============================================================================

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<CreateEventRequest> for NewEvent {
    type Error = DomainError;

    fn try_from(request: CreateEventRequest) -> Result<Self, Self::Error> {
        let name = present(request.name).or_else(|| present(request.event_name));
        let description = present(request.description);
        let start_date = present(request.start_date);
        let end_date = present(request.end_date);
        let location = present(request.location);
        let category = present(request.category);

        let missing: Vec<String> = [
            ("name", name.is_none()),
            ("description", description.is_none()),
            ("start_date", start_date.is_none()),
            ("end_date", end_date.is_none()),
            ("location", location.is_none()),
            ("category", category.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then(|| field.to_string()))
        .collect();
        if !missing.is_empty() {
            return Err(DomainError::MissingFields(missing));
        }

        Ok(Self {
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            start_date: start_date.unwrap_or_default(),
            end_date: end_date.unwrap_or_default(),
            location: location.unwrap_or_default(),
            category: category.unwrap_or_default(),
            status: request.status,
            publish_event: request.publish_event,
            points_awarded: coerce_count("points_awarded", request.points_awarded.as_ref())?,
            hours_required: coerce_count("hours_required", request.hours_required.as_ref())?,
            participant_limit: coerce_count(
                "participant_limit",
                request.participant_limit.as_ref(),
            )?,
            age_restriction: request.age_restriction,
            contact_information: request.contact_information,
            event_image: request.event_image,
            requirements: request.requirements.unwrap_or_default(),
            skills_needed: request.skills_needed.unwrap_or_default(),
        })
    }
}

impl TryFrom<UpdateEventRequest> for EventPatch {
    type Error = DomainError;

    fn try_from(request: UpdateEventRequest) -> Result<Self, Self::Error> {
        let count = |field: &str, value: Option<&serde_json::Value>| {
            value.map(|v| coerce_count(field, Some(v))).transpose()
        };

        Ok(Self {
            points_awarded: count("points_awarded", request.points_awarded.as_ref())?,
            hours_required: count("hours_required", request.hours_required.as_ref())?,
            participant_limit: count("participant_limit", request.participant_limit.as_ref())?,
            name: request.name.or(request.event_name),
            description: request.description,
            start_date: request.start_date,
            end_date: request.end_date,
            location: request.location,
            category: request.category,
            status: request.status,
            publish_event: request.publish_event,
            age_restriction: request.age_restriction,
            contact_information: request.contact_information,
            event_image: request.event_image,
            requirements: request.requirements,
            skills_needed: request.skills_needed,
        })
    }
}
