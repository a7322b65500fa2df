//! Event service
//!
//! Event CRUD plus registration and cancellation. A registration touches two
//! records: the event roster (the authoritative side, updated atomically with
//! its duplicate and capacity guards) and the user's profile event list.
//! The second write happens after the first has committed; if it fails the
//! registration still stands and the gap is logged for repair.

use tracing::{error, info, instrument};
use volunteer_core::{
    DomainError, Event, EventId, EventPatch, EventQuery, NewEvent, Participant, Role, UserId,
};

use crate::dto::{
    CancellationResponse, CreateEventRequest, EventListQuery, EventListResponse, EventResponse,
    ParticipantListResponse, ParticipantResponse, RegistrationResponse, UpdateEventRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::gate::Identity;

/// Outcome of a roster registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Whether the user's profile list was updated as well
    pub profile_synced: bool,
}

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn find(&self, event_id: EventId) -> ServiceResult<Event> {
        Ok(self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?)
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create an event with an empty roster
    #[instrument(skip(self, request))]
    pub async fn create_event(&self, request: CreateEventRequest) -> ServiceResult<EventResponse> {
        let input = NewEvent::try_from(request)?;
        let event = Event::new(EventId::generate(), input);

        self.ctx.event_repo().create(&event).await?;

        info!(event_id = %event.id, name = %event.name, "Event created");

        Ok(EventResponse::from(&event))
    }

    /// Merge a partial update over an event. The roster is never touched
    /// and a positive limit may not drop below it.
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        event_id: EventId,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        let patch = EventPatch::try_from(request)?;
        let mut event = self.find(event_id).await?;

        event.apply_patch(patch)?;
        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event_id, "Event updated");

        Ok(EventResponse::from(&event))
    }

    /// Hard delete an event. Profiles that reference it are left as they are.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: EventId) -> ServiceResult<()> {
        self.ctx.event_repo().delete(event_id).await?;

        info!(event_id = %event_id, "Event deleted");

        Ok(())
    }

    /// Get one event
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: EventId) -> ServiceResult<EventResponse> {
        Ok(EventResponse::from(self.find(event_id).await?))
    }

    /// List events visible to `viewer`.
    ///
    /// Anonymous and non-admin callers only ever see published events.
    /// Admins see everything unless they ask for `published=true`;
    /// `include_unpublished=true` overrides that filter.
    #[instrument(skip(self, viewer))]
    pub async fn list_events(
        &self,
        query: EventListQuery,
        viewer: Option<&Identity>,
    ) -> ServiceResult<EventListResponse> {
        let is_admin = viewer.is_some_and(Identity::is_admin);
        let published_only = if is_admin {
            query.published == Some(true) && query.include_unpublished != Some(true)
        } else {
            true
        };

        let events = self
            .ctx
            .event_repo()
            .list(&EventQuery {
                status: query.status.filter(|s| !s.is_empty()),
                category: query.category.filter(|c| !c.is_empty()),
                published_only,
            })
            .await?;

        Ok(events
            .iter()
            .map(EventResponse::from)
            .collect::<Vec<_>>()
            .into())
    }

    /// Roster of an event, in registration order
    #[instrument(skip(self))]
    pub async fn participants(&self, event_id: EventId) -> ServiceResult<ParticipantListResponse> {
        let event = self.find(event_id).await?;
        Ok(event
            .participants
            .iter()
            .map(ParticipantResponse::from)
            .collect::<Vec<_>>()
            .into())
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Put a user on an event roster and link the event on their profile.
    ///
    /// The roster append is one conditional update that rejects duplicates
    /// before checking capacity. The profile link runs only after the roster
    /// has committed.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        event_id: EventId,
        user_id: UserId,
        role: Role,
    ) -> ServiceResult<Registration> {
        self.ctx
            .event_repo()
            .add_participant(event_id, &Participant::registered(user_id, role))
            .await?;

        let profile_synced = match self.ctx.user_repo().link_event(user_id, role, event_id).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    event_id = %event_id,
                    user_id = %user_id,
                    error = %e,
                    "Registered on roster but profile link failed; needs repair"
                );
                false
            }
        };

        info!(event_id = %event_id, user_id = %user_id, profile_synced, "User registered for event");

        Ok(Registration { profile_synced })
    }

    /// Take a user off an event roster and unlink the event from their
    /// profile. Returns whether a roster entry was removed.
    #[instrument(skip(self))]
    pub async fn cancel_registration(&self, event_id: EventId, user_id: UserId) -> ServiceResult<bool> {
        let removed = self
            .ctx
            .event_repo()
            .remove_participant(event_id, user_id)
            .await?;

        // Runs even when the roster had no entry
        if let Err(e) = self.ctx.user_repo().unlink_event(user_id, event_id).await {
            error!(
                event_id = %event_id,
                user_id = %user_id,
                error = %e,
                "Profile unlink failed after cancellation; needs repair"
            );
        }

        if removed {
            info!(event_id = %event_id, user_id = %user_id, "Registration cancelled");
        }

        Ok(removed)
    }

    /// Register the caller for a published event
    pub async fn join(&self, event_id: EventId, identity: &Identity) -> ServiceResult<RegistrationResponse> {
        let event = self.find(event_id).await?;
        if !event.is_published() {
            return Err(DomainError::EventNotPublished.into());
        }

        let registration = self.register(event_id, identity.user_id, identity.role).await?;

        Ok(RegistrationResponse {
            message: "Successfully registered for event".to_string(),
            event_id,
            profile_synced: registration.profile_synced,
        })
    }

    /// Cancel the caller's registration; not being registered is an error
    pub async fn leave(&self, event_id: EventId, identity: &Identity) -> ServiceResult<CancellationResponse> {
        if !self.cancel_registration(event_id, identity.user_id).await? {
            return Err(DomainError::NotRegistered.into());
        }

        Ok(CancellationResponse {
            message: "Registration cancelled successfully".to_string(),
            event_id,
        })
    }
}
