//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in volunteer-core.

mod error;
mod event;
mod user;

pub use event::PgEventRepository;
pub use user::PgUserRepository;
