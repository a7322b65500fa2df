//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers between domain entities and DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateEventRequest, EventListQuery, LoginRequest, RegisterRequest, UpdateEventRequest,
    UpdateProfileRequest, UserListQuery,
};

pub use responses::{
    AuthResponse, CancellationResponse, EventListResponse, EventMutationResponse, EventResponse,
    HealthChecks, HealthResponse, LeaderboardEntry, LeaderboardResponse, MessageResponse,
    ParticipantListResponse, ParticipantResponse, ReadinessResponse, RegistrationResponse,
    TokenValidationResponse, UserListResponse, UserResponse,
};
