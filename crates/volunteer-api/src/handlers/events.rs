//! Event handlers
//!
//! Public event browsing, admin event management and the caller's own
//! registrations.

use axum::{extract::State, Json};
use volunteer_core::EventId;
use volunteer_service::dto::{
    CancellationResponse, CreateEventRequest, EventListQuery, EventListResponse,
    EventMutationResponse, EventResponse, MessageResponse, ParticipantListResponse,
    RegistrationResponse, UpdateEventRequest,
};
use volunteer_service::EventService;

use crate::extractors::{AdminUser, AuthUser, IdPath, OptionalAuthUser, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List events visible to the caller
///
/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    QueryParams(query): QueryParams<EventListQuery>,
) -> ApiResult<Json<EventListResponse>> {
    let service = EventService::new(state.service_context());
    let events = service.list_events(query, viewer.as_ref()).await?;
    Ok(Json(events))
}

/// Get one event
///
/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.get_event(event_id).await?))
}

/// Create an event
///
/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventMutationResponse>>> {
    let service = EventService::new(state.service_context());
    let event = service.create_event(request).await?;
    Ok(Created(Json(EventMutationResponse {
        message: "Event created successfully".to_string(),
        event,
    })))
}

/// Update an event
///
/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath<EventId>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventMutationResponse>> {
    let service = EventService::new(state.service_context());
    let event = service.update_event(event_id, request).await?;
    Ok(Json(EventMutationResponse {
        message: "Event updated successfully".to_string(),
        event,
    }))
}

/// Delete an event
///
/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = EventService::new(state.service_context());
    service.delete_event(event_id).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// Register the caller for an event
///
/// POST /api/events/{id}/register
pub async fn register(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<RegistrationResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.join(event_id, &identity).await?))
}

/// Cancel the caller's registration
///
/// POST /api/events/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<CancellationResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.leave(event_id, &identity).await?))
}

/// Roster of an event
///
/// GET /api/events/{id}/participants
pub async fn participants(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<ParticipantListResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.participants(event_id).await?))
}
