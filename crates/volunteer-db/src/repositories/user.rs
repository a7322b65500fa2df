//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use volunteer_core::{DomainError, EventId, Profile, RepoResult, Role, User, UserId, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: UserId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

fn into_users(rows: Vec<UserModel>) -> RepoResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, role, profile, is_active,
                   created_at, updated_at, last_login, last_access
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, role, profile, is_active,
                   created_at, updated_at, last_login, last_access
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, email, password_hash, role, profile, is_active,
                               created_at, updated_at, last_login, last_access)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.role.as_str())
        .bind(Json(&user.profile))
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.last_login)
        .bind(user.last_access)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, profile))]
    async fn update_profile(&self, id: UserId, profile: &Profile) -> RepoResult<()> {
        // `||` overwrites only the editable keys; event lists stay as stored
        let result = sqlx::query(
            r"
            UPDATE users
            SET profile = profile || $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(Json(profile.editable_fields()))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, role: Option<Role>) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, role, profile, is_active,
                   created_at, updated_at, last_login, last_access
            FROM users
            WHERE ($1::text IS NULL OR role = $1)
            ORDER BY created_at ASC
            ",
        )
        .bind(role.map(|r| r.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_users(rows)
    }

    #[instrument(skip(self))]
    async fn top_volunteers(&self, limit: i64) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, role, profile, is_active,
                   created_at, updated_at, last_login, last_access
            FROM users
            WHERE role = 'volunteer'
            ORDER BY COALESCE((profile ->> 'points')::int, 0) DESC, created_at ASC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_users(rows)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch_last_login(&self, id: UserId) -> RepoResult<()> {
        let result = sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch_last_access(&self, id: UserId) -> RepoResult<()> {
        let result = sqlx::query("UPDATE users SET last_access = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn link_event(&self, id: UserId, role: Role, event_id: EventId) -> RepoResult<()> {
        // The NOT @> guard gives set semantics in one statement
        let result = sqlx::query(
            r"
            UPDATE users
            SET profile = jsonb_set(
                    profile,
                    ARRAY[$2::text],
                    COALESCE(profile -> $2::text, '[]'::jsonb) || jsonb_build_array($3::text),
                    true
                ),
                updated_at = NOW()
            WHERE id = $1
              AND NOT COALESCE(profile -> $2::text, '[]'::jsonb) @> jsonb_build_array($3::text)
            ",
        )
        .bind(id.into_inner())
        .bind(role.event_list_field())
        .bind(event_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unlink_event(&self, id: UserId, event_id: EventId) -> RepoResult<()> {
        // Rebuild the document, filtering the id out of both event lists
        let result = sqlx::query(
            r"
            UPDATE users u
            SET profile = COALESCE(
                    (
                        SELECT jsonb_object_agg(
                            f.key,
                            CASE
                                WHEN f.key IN ('events_participated', 'events_attended')
                                     AND jsonb_typeof(f.value) = 'array'
                                THEN COALESCE(
                                    (
                                        SELECT jsonb_agg(e.elem ORDER BY e.ord)
                                        FROM jsonb_array_elements(f.value) WITH ORDINALITY AS e(elem, ord)
                                        WHERE e.elem <> to_jsonb($2::text)
                                    ),
                                    '[]'::jsonb
                                )
                                ELSE f.value
                            END
                        )
                        FROM jsonb_each(u.profile) AS f(key, value)
                    ),
                    '{}'::jsonb
                ),
                updated_at = NOW()
            WHERE u.id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(event_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
