//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod event;
pub mod gate;
pub mod leaderboard;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::{EventService, Registration};
pub use gate::{AccessLevel, AuthorizationGate, Identity};
pub use leaderboard::{LeaderboardService, LEADERBOARD_SIZE};
pub use user::UserService;
