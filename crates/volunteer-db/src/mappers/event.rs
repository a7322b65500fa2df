//! Event entity <-> model mapper

use volunteer_core::{Event, EventId};

use crate::models::EventModel;

/// Convert EventModel to Event entity
impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: EventId::from_uuid(model.id),
            name: model.name,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            location: model.location,
            category: model.category,
            status: model.status,
            publish_event: model.publish_event,
            points_awarded: model.points_awarded,
            hours_required: model.hours_required,
            participant_limit: model.participant_limit,
            age_restriction: model.age_restriction,
            contact_information: model.contact_information,
            event_image: model.event_image,
            requirements: model.requirements,
            skills_needed: model.skills_needed,
            participants: model.participants.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
