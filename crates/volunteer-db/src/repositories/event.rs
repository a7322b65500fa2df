//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use volunteer_core::{
    DomainError, Event, EventId, EventQuery, EventRepository, Participant, RepoResult, UserId,
};

use crate::models::{EventModel, RosterStateModel};

use super::error::{event_not_found, map_db_error};

/// How often a conditional roster-guarded update is retried when it missed
/// but a re-read shows it would now pass (a cancellation landed in between).
const GUARDED_UPDATE_ATTEMPTS: usize = 3;

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn roster_state(&self, id: EventId, user_id: UserId) -> RepoResult<Option<RosterStateModel>> {
        sqlx::query_as::<_, RosterStateModel>(
            r"
            SELECT participant_limit,
                   jsonb_array_length(participants) AS participant_count,
                   participants @> jsonb_build_array(jsonb_build_object('user_id', $2::text)) AS registered
            FROM events
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, name, description, start_date, end_date, location, category, status,
                   publish_event, points_awarded, hours_required, participant_limit,
                   age_restriction, contact_information, event_image, requirements,
                   skills_needed, participants, created_at, updated_at
            FROM events
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[EventId]) -> RepoResult<Vec<Event>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();

        let rows = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, name, description, start_date, end_date, location, category, status,
                   publish_event, points_awarded, hours_required, participant_limit,
                   age_restriction, contact_information, event_image, requirements,
                   skills_needed, participants, created_at, updated_at
            FROM events
            WHERE id = ANY($1)
            ORDER BY start_date ASC, created_at ASC
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &EventQuery) -> RepoResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventModel>(
            r"
            SELECT id, name, description, start_date, end_date, location, category, status,
                   publish_event, points_awarded, hours_required, participant_limit,
                   age_restriction, contact_information, event_image, requirements,
                   skills_needed, participants, created_at, updated_at
            FROM events
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
              AND (NOT $3 OR publish_event)
            ORDER BY start_date ASC, created_at ASC
            ",
        )
        .bind(query.status.as_deref())
        .bind(query.category.as_deref())
        .bind(query.published_only)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO events (id, name, description, start_date, end_date, location, category,
                                status, publish_event, points_awarded, hours_required,
                                participant_limit, age_restriction, contact_information,
                                event_image, requirements, skills_needed, participants,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20)
            ",
        )
        .bind(event.id.into_inner())
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.start_date)
        .bind(&event.end_date)
        .bind(&event.location)
        .bind(&event.category)
        .bind(&event.status)
        .bind(event.publish_event)
        .bind(event.points_awarded)
        .bind(event.hours_required)
        .bind(event.participant_limit)
        .bind(&event.age_restriction)
        .bind(&event.contact_information)
        .bind(&event.event_image)
        .bind(&event.requirements)
        .bind(&event.skills_needed)
        .bind(Json(&event.participants))
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        for attempt in 1..=GUARDED_UPDATE_ATTEMPTS {
            // The limit guard is evaluated against the locked row's roster
            let result = sqlx::query(
                r"
                UPDATE events
                SET name = $2, description = $3, start_date = $4, end_date = $5, location = $6,
                    category = $7, status = $8, publish_event = $9, points_awarded = $10,
                    hours_required = $11, participant_limit = $12, age_restriction = $13,
                    contact_information = $14, event_image = $15, requirements = $16,
                    skills_needed = $17, updated_at = $18
                WHERE id = $1
                  AND ($12 <= 0 OR jsonb_array_length(participants) <= $12)
                ",
            )
            .bind(event.id.into_inner())
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.start_date)
            .bind(&event.end_date)
            .bind(&event.location)
            .bind(&event.category)
            .bind(&event.status)
            .bind(event.publish_event)
            .bind(event.points_awarded)
            .bind(event.hours_required)
            .bind(event.participant_limit)
            .bind(&event.age_restriction)
            .bind(&event.contact_information)
            .bind(&event.event_image)
            .bind(&event.requirements)
            .bind(&event.skills_needed)
            .bind(event.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 1 {
                return Ok(());
            }

            let registered = sqlx::query_scalar::<_, i32>(
                "SELECT jsonb_array_length(participants) FROM events WHERE id = $1",
            )
            .bind(event.id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

            let Some(registered) = registered else {
                return Err(event_not_found(event.id));
            };
            Event::check_participant_limit(
                event.participant_limit,
                usize::try_from(registered).unwrap_or_default(),
            )?;
            debug!(attempt, "Roster shrank between update and re-read, retrying");
        }

        Err(DomainError::ValidationError(format!(
            "participant_limit {} is below the current roster",
            event.participant_limit
        )))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EventId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, participant), fields(user_id = %participant.user_id))]
    async fn add_participant(&self, id: EventId, participant: &Participant) -> RepoResult<()> {
        let entry = Json(std::slice::from_ref(participant));

        for attempt in 1..=GUARDED_UPDATE_ATTEMPTS {
            // Duplicate and capacity guards are evaluated against the locked row
            let result = sqlx::query(
                r"
                UPDATE events
                SET participants = participants || $2, updated_at = NOW()
                WHERE id = $1
                  AND NOT participants @> jsonb_build_array(jsonb_build_object('user_id', $3::text))
                  AND (participant_limit <= 0 OR jsonb_array_length(participants) < participant_limit)
                ",
            )
            .bind(id.into_inner())
            .bind(&entry)
            .bind(participant.user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 1 {
                return Ok(());
            }

            match self.roster_state(id, participant.user_id).await? {
                None => return Err(event_not_found(id)),
                Some(state) if state.registered => return Err(DomainError::AlreadyRegistered),
                Some(state) if state.is_full() => return Err(DomainError::EventFull),
                Some(_) => debug!(attempt, "Roster changed between update and re-read, retrying"),
            }
        }

        Err(DomainError::EventFull)
    }

    #[instrument(skip(self))]
    async fn remove_participant(&self, id: EventId, user_id: UserId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE events
            SET participants = COALESCE(
                    (
                        SELECT jsonb_agg(p.elem ORDER BY p.ord)
                        FROM jsonb_array_elements(participants) WITH ORDINALITY AS p(elem, ord)
                        WHERE p.elem ->> 'user_id' <> $2
                    ),
                    '[]'::jsonb
                ),
                updated_at = NOW()
            WHERE id = $1
              AND participants @> jsonb_build_array(jsonb_build_object('user_id', $2::text))
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        if exists {
            Ok(false)
        } else {
            Err(event_not_found(id))
        }
    }
}
