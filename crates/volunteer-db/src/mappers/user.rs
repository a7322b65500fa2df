//! User entity <-> model mapper

use volunteer_core::{DomainError, Profile, Role, User, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role: Role = model.role.parse().map_err(|e| {
            DomainError::DatabaseError(format!("user {} has a corrupt role: {e}", model.id))
        })?;
        let profile = Profile::from_value(role, model.profile.0).map_err(|e| {
            DomainError::DatabaseError(format!("user {} has a corrupt profile: {e}", model.id))
        })?;

        Ok(User {
            id: UserId::from_uuid(model.id),
            name: model.name,
            email: model.email,
            role,
            profile,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_login: model.last_login,
            last_access: model.last_access,
        })
    }
}
