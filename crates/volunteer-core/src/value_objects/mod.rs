//! Value objects - immutable types that represent domain concepts

mod category;
mod count;
mod ids;
mod role;

pub use category::default_image_for_category;
pub use count::coerce_count;
pub use ids::{EventId, IdParseError, UserId};
pub use role::{Role, RoleParseError};
