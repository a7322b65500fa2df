//! # volunteer-service
//!
//! Application layer containing the authorization gate, business services and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AccessLevel, AuthService, AuthorizationGate, EventService, Identity, LeaderboardService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
