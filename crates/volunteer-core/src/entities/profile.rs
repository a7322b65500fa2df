//! Role-specific user profiles
//!
//! Every user carries exactly one profile variant, selected by the account
//! role when the user is created. Each variant owns one list of event ids
//! that mirrors the event rosters the user appears on.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::value_objects::{EventId, Role};

pub const DEFAULT_DEPARTMENT: &str = "General";
pub const DEFAULT_ADMIN_PERMISSIONS: [&str; 2] = ["manage_events", "view_users"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerProfile {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub bio: String,
    pub availability: String,
    pub points: i32,
    pub hours_contributed: i32,
    pub events_participated: Vec<EventId>,
    pub badges: Vec<String>,
    pub certificates: Vec<String>,
    pub phone_number: String,
    pub address: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantProfile {
    pub disability_type: String,
    pub interests: Vec<String>,
    pub events_attended: Vec<EventId>,
    pub emergency_contact: String,
    pub age: String,
    pub special_needs: String,
    pub phone_number: String,
    pub address: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminProfile {
    pub department: String,
    pub permissions: Vec<String>,
    pub events_attended: Vec<EventId>,
    pub phone_number: String,
    pub photo_url: String,
}

impl Default for AdminProfile {
    fn default() -> Self {
        Self {
            department: DEFAULT_DEPARTMENT.to_string(),
            permissions: DEFAULT_ADMIN_PERMISSIONS.iter().map(ToString::to_string).collect(),
            events_attended: Vec::new(),
            phone_number: String::new(),
            photo_url: String::new(),
        }
    }
}

/// User-supplied profile fields, used both at sign-up and for profile edits.
///
/// Fields that do not belong to the user's role are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileDetails {
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub bio: Option<String>,
    pub availability: Option<String>,
    pub disability_type: Option<String>,
    pub emergency_contact: Option<String>,
    pub age: Option<String>,
    pub special_needs: Option<String>,
    pub department: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
}

/// Role-tagged profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Volunteer(VolunteerProfile),
    Participant(ParticipantProfile),
    Admin(AdminProfile),
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl Profile {
    /// Build the initial profile for a new account.
    ///
    /// Admin permissions are only taken from the details here; later edits
    /// cannot change them.
    pub fn new(role: Role, details: ProfileDetails) -> Self {
        let mut profile = match role {
            Role::Volunteer => Self::Volunteer(VolunteerProfile::default()),
            Role::Participant => Self::Participant(ParticipantProfile::default()),
            Role::Admin => Self::Admin(AdminProfile::default()),
        };
        if let Self::Admin(admin) = &mut profile {
            set(&mut admin.permissions, details.permissions.clone());
        }
        profile.apply_details(details);
        profile
    }

    /// Decode a stored profile document for an account of the given role
    pub fn from_value(role: Role, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match role {
            Role::Volunteer => Self::Volunteer(serde_json::from_value(value)?),
            Role::Participant => Self::Participant(serde_json::from_value(value)?),
            Role::Admin => Self::Admin(serde_json::from_value(value)?),
        })
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Volunteer(_) => Role::Volunteer,
            Self::Participant(_) => Role::Participant,
            Self::Admin(_) => Role::Admin,
        }
    }

    /// Events this user is signed up for
    pub fn event_ids(&self) -> &[EventId] {
        match self {
            Self::Volunteer(p) => &p.events_participated,
            Self::Participant(p) => &p.events_attended,
            Self::Admin(p) => &p.events_attended,
        }
    }

    fn event_ids_mut(&mut self) -> &mut Vec<EventId> {
        match self {
            Self::Volunteer(p) => &mut p.events_participated,
            Self::Participant(p) => &mut p.events_attended,
            Self::Admin(p) => &mut p.events_attended,
        }
    }

    /// Add an event id with set semantics. Returns whether it was added.
    pub fn link_event(&mut self, event_id: EventId) -> bool {
        let ids = self.event_ids_mut();
        if ids.contains(&event_id) {
            return false;
        }
        ids.push(event_id);
        true
    }

    /// Remove an event id. Returns whether it was present.
    pub fn unlink_event(&mut self, event_id: EventId) -> bool {
        let ids = self.event_ids_mut();
        let before = ids.len();
        ids.retain(|id| *id != event_id);
        ids.len() != before
    }

    /// Merge the editable fields of `details` that apply to this role
    pub fn apply_details(&mut self, details: ProfileDetails) {
        match self {
            Self::Volunteer(p) => {
                set(&mut p.skills, details.skills);
                set(&mut p.interests, details.interests);
                set(&mut p.bio, details.bio);
                set(&mut p.availability, details.availability);
                set(&mut p.phone_number, details.phone_number);
                set(&mut p.address, details.address);
                set(&mut p.photo_url, details.photo_url);
            }
            Self::Participant(p) => {
                set(&mut p.disability_type, details.disability_type);
                set(&mut p.interests, details.interests);
                set(&mut p.emergency_contact, details.emergency_contact);
                set(&mut p.age, details.age);
                set(&mut p.special_needs, details.special_needs);
                set(&mut p.phone_number, details.phone_number);
                set(&mut p.address, details.address);
                set(&mut p.photo_url, details.photo_url);
            }
            Self::Admin(p) => {
                set(&mut p.department, details.department);
                set(&mut p.phone_number, details.phone_number);
                set(&mut p.photo_url, details.photo_url);
            }
        }
    }

    /// The user-editable subset of this profile as a JSON object.
    ///
    /// Event lists and earned counters are never part of it, so storing
    /// this subset cannot disturb registration bookkeeping.
    pub fn editable_fields(&self) -> Value {
        match self {
            Self::Volunteer(p) => json!({
                "skills": p.skills,
                "interests": p.interests,
                "bio": p.bio,
                "availability": p.availability,
                "phone_number": p.phone_number,
                "address": p.address,
                "photo_url": p.photo_url,
            }),
            Self::Participant(p) => json!({
                "disability_type": p.disability_type,
                "interests": p.interests,
                "emergency_contact": p.emergency_contact,
                "age": p.age,
                "special_needs": p.special_needs,
                "phone_number": p.phone_number,
                "address": p.address,
                "photo_url": p.photo_url,
            }),
            Self::Admin(p) => json!({
                "department": p.department,
                "phone_number": p.phone_number,
                "photo_url": p.photo_url,
            }),
        }
    }
}
