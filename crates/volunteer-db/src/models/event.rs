//! Event database models

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use volunteer_core::Participant;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: Uuid,
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
    pub age_restriction: String,
    pub contact_information: String,
    pub event_image: String,
    pub requirements: Vec<String>,
    pub skills_needed: Vec<String>,
    pub participants: Json<Vec<Participant>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Roster summary used to explain why a conditional registration update
/// matched no row
#[derive(Debug, Clone, FromRow)]
pub struct RosterStateModel {
    pub participant_limit: i32,
    pub participant_count: i32,
    pub registered: bool,
}

impl RosterStateModel {
    #[inline]
    pub fn is_full(&self) -> bool {
        self.participant_limit > 0 && self.participant_count >= self.participant_limit
    }
}
