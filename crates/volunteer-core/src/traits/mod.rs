//! Repository traits (ports)

mod repositories;

pub use repositories::{EventQuery, EventRepository, RepoResult, UserRepository};
