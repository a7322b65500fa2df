//! Domain entities - core business objects

mod event;
mod profile;
mod user;

pub use event::{Event, EventPatch, NewEvent, Participant};
pub use profile::{AdminProfile, ParticipantProfile, Profile, ProfileDetails, VolunteerProfile};
pub use user::User;
