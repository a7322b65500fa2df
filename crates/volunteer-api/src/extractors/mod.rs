//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path ids, query strings and validation.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AdminUser, AuthUser, OptionalAuthUser};
pub use path::{IdPath, PathId};
pub use query::QueryParams;
pub use validated::ValidatedJson;
