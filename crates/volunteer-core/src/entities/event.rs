//! Event entity - a volunteering event with a capped participant roster

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{default_image_for_category, EventId, Role, UserId};

pub const DEFAULT_STATUS: &str = "Upcoming";
pub const DEFAULT_AGE_RESTRICTION: &str = "No Restriction";

/// One entry of an event's participant roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub role: Role,
    pub registration_date: DateTime<Utc>,
    pub status: String,
}

impl Participant {
    pub const STATUS_REGISTERED: &'static str = "registered";

    /// A fresh registration stamped with the current time
    pub fn registered(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            registration_date: Utc::now(),
            status: Self::STATUS_REGISTERED.to_string(),
        }
    }
}

/// Validated input for creating an event.
///
/// Counters are already coerced; optional text left as `None` (or blank)
/// receives the event defaults.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub category: String,
    pub status: Option<String>,
    pub publish_event: Option<bool>,
    pub points_awarded: i32,
    pub hours_required: i32,
    pub participant_limit: i32,
    pub age_restriction: Option<String>,
    pub contact_information: Option<String>,
    pub event_image: Option<String>,
    pub requirements: Vec<String>,
    pub skills_needed: Vec<String>,
}

/// Partial update of an event. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub publish_event: Option<bool>,
    pub points_awarded: Option<i32>,
    pub hours_required: Option<i32>,
    pub participant_limit: Option<i32>,
    pub age_restriction: Option<String>,
    pub contact_information: Option<String>,
    pub event_image: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub skills_needed: Option<Vec<String>>,
}

/// Event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
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
    /// Maximum roster size; `0` means unlimited
    pub participant_limit: i32,
    pub age_restriction: String,
    pub contact_information: String,
    pub event_image: String,
    pub requirements: Vec<String>,
    pub skills_needed: Vec<String>,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Event {
    /// Build a new event with an empty roster, applying defaults
    pub fn new(id: EventId, input: NewEvent) -> Self {
        let now = Utc::now();
        let event_image = non_blank(input.event_image)
            .unwrap_or_else(|| default_image_for_category(&input.category));

        Self {
            id,
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            location: input.location,
            category: input.category,
            status: non_blank(input.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            publish_event: input.publish_event.unwrap_or(false),
            points_awarded: input.points_awarded,
            hours_required: input.hours_required,
            participant_limit: input.participant_limit,
            age_restriction: non_blank(input.age_restriction)
                .unwrap_or_else(|| DEFAULT_AGE_RESTRICTION.to_string()),
            contact_information: input.contact_information.unwrap_or_default(),
            event_image,
            requirements: input.requirements,
            skills_needed: input.skills_needed,
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        self.publish_event
    }

    #[inline]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster has reached a positive limit
    pub fn is_full(&self) -> bool {
        self.participant_limit > 0 && self.participants.len() >= self.participant_limit as usize
    }

    /// Reject a positive limit below the number already registered
    pub fn check_participant_limit(limit: i32, registered: usize) -> Result<(), DomainError> {
        if limit > 0 && usize::try_from(limit).is_ok_and(|limit| limit < registered) {
            return Err(DomainError::ValidationError(format!(
                "participant_limit {limit} is below the {registered} registered participants"
            )));
        }
        Ok(())
    }

    pub fn is_registered(&self, user_id: UserId) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    /// Check whether `user_id` may join the roster right now.
    ///
    /// A repeat registration is reported as a duplicate even when the
    /// event is also full.
    pub fn check_registration(&self, user_id: UserId) -> Result<(), DomainError> {
        if self.is_registered(user_id) {
            return Err(DomainError::AlreadyRegistered);
        }
        if self.is_full() {
            return Err(DomainError::EventFull);
        }
        Ok(())
    }

    /// Append a participant after checking duplicate and capacity rules
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        self.check_registration(participant.user_id)?;
        self.participants.push(participant);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a participant. Returns whether an entry was removed.
    pub fn remove_participant(&mut self, user_id: UserId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.user_id != user_id);
        let removed = self.participants.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Merge a patch over this event.
    ///
    /// A category change without a non-blank image re-derives the default
    /// image for the new category. `updated_at` is always bumped. A patch
    /// that would shrink a positive limit below the roster is rejected
    /// before any field changes.
    pub fn apply_patch(&mut self, patch: EventPatch) -> Result<(), DomainError> {
        if let Some(limit) = patch.participant_limit {
            Self::check_participant_limit(limit, self.participants.len())?;
        }

        let image = non_blank(patch.event_image);

        if let Some(category) = patch.category {
            if category != self.category && image.is_none() {
                self.event_image = default_image_for_category(&category);
            }
            self.category = category;
        }
        if let Some(image) = image {
            self.event_image = image;
        }

        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.start_date {
            self.start_date = v;
        }
        if let Some(v) = patch.end_date {
            self.end_date = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.publish_event {
            self.publish_event = v;
        }
        if let Some(v) = patch.points_awarded {
            self.points_awarded = v;
        }
        if let Some(v) = patch.hours_required {
            self.hours_required = v;
        }
        if let Some(v) = patch.participant_limit {
            self.participant_limit = v;
        }
        if let Some(v) = patch.age_restriction {
            self.age_restriction = v;
        }
        if let Some(v) = patch.contact_information {
            self.contact_information = v;
        }
        if let Some(v) = patch.requirements {
            self.requirements = v;
        }
        if let Some(v) = patch.skills_needed {
            self.skills_needed = v;
        }

        self.updated_at = Utc::now();
        Ok(())
    }
}
