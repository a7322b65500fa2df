//! Account roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a user account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Volunteer,
    Participant,
    Admin,
}

/// Error when parsing a role from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0} (expected volunteer, participant or admin)")]
pub struct RoleParseError(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Volunteer, Role::Participant, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Participant => "participant",
            Self::Admin => "admin",
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Name of the profile list that records the events this role has
    /// signed up for.
    pub fn event_list_field(&self) -> &'static str {
        match self {
            Self::Volunteer => "events_participated",
            Self::Participant | Self::Admin => "events_attended",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volunteer" => Ok(Self::Volunteer),
            "participant" => Ok(Self::Participant),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}
