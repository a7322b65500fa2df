//! # volunteer-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdminProfile, Event, EventPatch, NewEvent, Participant, ParticipantProfile, Profile,
    ProfileDetails, User, VolunteerProfile,
};
pub use error::DomainError;
pub use traits::{EventQuery, EventRepository, RepoResult, UserRepository};
pub use value_objects::{
    coerce_count, default_image_for_category, EventId, IdParseError, Role, RoleParseError, UserId,
};
