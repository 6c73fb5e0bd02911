use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use playhub_backend_rs::{
    database::{
        event::{Event, EventKind, EventOverType, StoredData},
        level::Level,
        photo::Photo,
        score::Score,
        user::User,
    },
    error::AppError,
    feed::objects::ObjectStore,
};
use uuid::Uuid;

/// Stand-in for the database: the same tolerant batch lookups, backed by
/// maps.
#[derive(Default)]
pub struct InMemoryStore {
    pub users: HashMap<Uuid, User>,
    pub levels: HashMap<i32, Level>,
    pub scores: HashMap<Uuid, Score>,
    pub photos: HashMap<i32, Photo>,
}

impl InMemoryStore {
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }
    pub fn with_level(mut self, level: Level) -> Self {
        self.levels.insert(level.id, level);
        self
    }
    pub fn with_score(mut self, score: Score) -> Self {
        self.scores.insert(score.id, score);
        self
    }
    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photos.insert(photo.id, photo);
        self
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn resolve_users(&self, ids: &[Uuid]) -> Result<Vec<User>, AppError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id).cloned())
            .collect())
    }
    async fn resolve_levels(&self, ids: &[i32]) -> Result<Vec<Level>, AppError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.levels.get(id).cloned())
            .collect())
    }
    async fn resolve_scores(&self, ids: &[Uuid]) -> Result<Vec<Score>, AppError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.scores.get(id).cloned())
            .collect())
    }
    async fn resolve_photos(&self, ids: &[i32]) -> Result<Vec<Photo>, AppError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.photos.get(id).cloned())
            .collect())
    }
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

pub fn make_user(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        icon_hash: "g000000".to_string(),
        description: String::new(),
        join_date: at(1, 0),
    }
}

pub fn make_level(id: i32, publisher: Uuid) -> Level {
    Level {
        id,
        title: format!("level {id}"),
        description: String::new(),
        publisher,
        icon_hash: "g000001".to_string(),
        publish_date: at(1, 0),
        update_date: at(1, 0),
    }
}

pub fn make_score(level_id: i32, player: Uuid, value: i32) -> Score {
    Score {
        id: Uuid::new_v4(),
        level_id,
        player,
        score: value,
        score_type: 1,
        submitted_at: at(2, 0),
    }
}

pub fn make_photo(id: i32, taken_by: Uuid, level_id: Option<i32>) -> Photo {
    Photo {
        id,
        taken_by,
        level_id,
        small_hash: "s000000".to_string(),
        large_hash: "l000000".to_string(),
        taken_at: at(2, 0),
    }
}

pub fn make_event(
    kind: EventKind,
    actor: Uuid,
    data: StoredData,
    timestamp: DateTime<Utc>,
) -> Event {
    Event {
        id: Uuid::new_v4(),
        kind,
        actor,
        involved_user: None,
        over_type: EventOverType::Activity,
        timestamp,
        data,
        description: None,
        is_modified: false,
        is_private: false,
    }
}
