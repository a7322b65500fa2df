//! User entity - an account holder with a role-specific profile

use chrono::{DateTime, Utc};

use crate::entities::{Profile, ProfileDetails};
use crate::value_objects::{Role, UserId};

/// User entity. The password hash is kept out of the entity and only read
/// through the repository when credentials are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile: Profile,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub last_access: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new User whose profile variant follows `role`
    pub fn new(id: UserId, name: String, email: String, role: Role, details: ProfileDetails) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            role,
            profile: Profile::new(role, details),
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login: None,
            last_access: None,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Merge editable profile fields
    pub fn update_profile(&mut self, details: ProfileDetails) {
        self.profile.apply_details(details);
        self.updated_at = Utc::now();
    }
}
