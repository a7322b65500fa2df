//! Database models - SQLx-compatible structs for PostgreSQL tables

mod event;
mod user;

pub use event::{EventModel, RosterStateModel};
pub use user::UserModel;
