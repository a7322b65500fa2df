//! In-memory repositories for service tests
//!
//! Each repository guards its map with one mutex, so every mutation is
//! atomic per record just like the conditional updates of the SQL store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use volunteer_common::TokenService;
use volunteer_core::{
    DomainError, Event, EventId, EventQuery, EventRepository, NewEvent, Participant, Profile,
    ProfileDetails, RepoResult, Role, User, UserId, UserRepository,
};

use super::context::{ServiceContext, ServiceContextBuilder};

pub const TEST_SECRET: &str = "test-secret-key-that-is-long-enough";
pub const TEST_ADMIN_CODE: &str = "let-me-in";

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, (User, String)>>,
    fail_links: AtomicBool,
}

impl InMemoryUserRepository {
    /// Make every subsequent profile link/unlink fail with a storage error
    pub fn fail_links(&self, fail: bool) {
        self.fail_links.store(fail, Ordering::SeqCst);
    }

    fn check_links(&self) -> RepoResult<()> {
        if self.fail_links.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("profile store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.lock().get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.users.lock().values().any(|(u, _)| u.email == email))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut users = self.users.lock();
        if users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        users.insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.users.lock().get(&id).map(|(_, h)| h.clone()))
    }

    async fn update_profile(&self, id: UserId, profile: &Profile) -> RepoResult<()> {
        let mut users = self.users.lock();
        let (user, _) = users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;

        let mut stored = serde_json::to_value(&user.profile)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        if let (Value::Object(stored), Value::Object(edits)) = (&mut stored, profile.editable_fields()) {
            stored.extend(edits);
        }
        user.profile = Profile::from_value(user.role, stored)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        Ok(())
    }

    async fn list(&self, role: Option<Role>) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .values()
            .filter(|(u, _)| role.is_none_or(|r| u.role == r))
            .map(|(u, _)| u.clone())
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn top_volunteers(&self, limit: i64) -> RepoResult<Vec<User>> {
        let points = |u: &User| match &u.profile {
            Profile::Volunteer(v) => v.points,
            _ => 0,
        };
        let mut users = self.list(Some(Role::Volunteer)).await?;
        users.sort_by(|a, b| points(b).cmp(&points(a)).then(a.created_at.cmp(&b.created_at)));
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        self.users
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::UserNotFound(id))
    }

    async fn touch_last_login(&self, id: UserId) -> RepoResult<()> {
        let mut users = self.users.lock();
        let (user, _) = users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        user.last_login = Some(chrono::Utc::now());
        Ok(())
    }

    async fn touch_last_access(&self, id: UserId) -> RepoResult<()> {
        let mut users = self.users.lock();
        let (user, _) = users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        user.last_access = Some(chrono::Utc::now());
        Ok(())
    }

    async fn link_event(&self, id: UserId, _role: Role, event_id: EventId) -> RepoResult<()> {
        self.check_links()?;
        let mut users = self.users.lock();
        let (user, _) = users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        user.profile.link_event(event_id);
        Ok(())
    }

    async fn unlink_event(&self, id: UserId, event_id: EventId) -> RepoResult<()> {
        self.check_links()?;
        let mut users = self.users.lock();
        let (user, _) = users.get_mut(&id).ok_or(DomainError::UserNotFound(id))?;
        user.profile.unlink_event(event_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEventRepository {
    events: Mutex<HashMap<EventId, Event>>,
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>> {
        Ok(self.events.lock().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[EventId]) -> RepoResult<Vec<Event>> {
        let events = self.events.lock();
        Ok(ids.iter().filter_map(|id| events.get(id).cloned()).collect())
    }

    async fn list(&self, query: &EventQuery) -> RepoResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .values()
            .filter(|e| query.status.as_ref().is_none_or(|s| &e.status == s))
            .filter(|e| query.category.as_ref().is_none_or(|c| &e.category == c))
            .filter(|e| !query.published_only || e.publish_event)
            .cloned()
            .collect();
        events.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(events)
    }

    async fn create(&self, event: &Event) -> RepoResult<()> {
        self.events.lock().insert(event.id, event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> RepoResult<()> {
        let mut events = self.events.lock();
        let stored = events.get_mut(&event.id).ok_or(DomainError::EventNotFound(event.id))?;
        Event::check_participant_limit(event.participant_limit, stored.participants.len())?;
        let roster = std::mem::take(&mut stored.participants);
        *stored = event.clone();
        stored.participants = roster;
        Ok(())
    }

    async fn delete(&self, id: EventId) -> RepoResult<()> {
        self.events
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::EventNotFound(id))
    }

    async fn add_participant(&self, id: EventId, participant: &Participant) -> RepoResult<()> {
        let mut events = self.events.lock();
        let event = events.get_mut(&id).ok_or(DomainError::EventNotFound(id))?;
        event.add_participant(participant.clone())
    }

    async fn remove_participant(&self, id: EventId, user_id: UserId) -> RepoResult<bool> {
        let mut events = self.events.lock();
        let event = events.get_mut(&id).ok_or(DomainError::EventNotFound(id))?;
        Ok(event.remove_participant(user_id))
    }
}

pub struct Repos {
    pub users: Arc<InMemoryUserRepository>,
    pub events: Arc<InMemoryEventRepository>,
}

/// Context over fresh in-memory repositories with admin sign-up enabled
pub fn context() -> (ServiceContext, Repos) {
    let repos = Repos {
        users: Arc::new(InMemoryUserRepository::default()),
        events: Arc::new(InMemoryEventRepository::default()),
    };
    let ctx = ServiceContextBuilder::new()
        .user_repo(repos.users.clone())
        .event_repo(repos.events.clone())
        .token_service(Arc::new(TokenService::new(TEST_SECRET, 86400)))
        .admin_access_code(Some(TEST_ADMIN_CODE.to_string()))
        .build()
        .unwrap();
    (ctx, repos)
}

pub async fn seed_user(repos: &Repos, role: Role) -> User {
    let id = UserId::generate();
    let user = User::new(
        id,
        format!("User {id}"),
        format!("user_{id}@example.com"),
        role,
        ProfileDetails::default(),
    );
    repos.users.create(&user, "not-a-real-hash").await.unwrap();
    user
}

pub async fn seed_event(repos: &Repos, limit: i32, published: bool) -> Event {
    let event = Event::new(
        EventId::generate(),
        NewEvent {
            name: "Beach Cleanup".to_string(),
            description: "Pick up litter along the shore".to_string(),
            start_date: "2025-06-01".to_string(),
            end_date: "2025-06-01".to_string(),
            location: "North Beach".to_string(),
            category: "environment".to_string(),
            publish_event: Some(published),
            participant_limit: limit,
            ..NewEvent::default()
        },
    );
    repos.events.create(&event).await.unwrap();
    event
}
