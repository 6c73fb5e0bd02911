use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};
use uuid::Uuid;

use crate::error::AppError;

use super::{numerical_thing, object_thing, DatabaseClient};

/// What a single event record points at. Exactly one payload per stored data
/// type, so an event can never carry a level tag with a user id, the
/// mismatch is unrepresentable.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "data_type", content = "data_id", rename_all = "snake_case")]
pub enum StoredData {
    User(Uuid),
    Level(i32),
    Score(Uuid),
    Photo(i32),
    RateLevelRelation(i32),
    Review(i32),
    Comment(i32),
    Playlist(i32),
    Challenge(i32),
    Contest(i32),
    Asset(Uuid),
    Pin(i64),
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    LevelUpload,
    LevelFavourite,
    LevelUnfavourite,
    UserFavourite,
    UserUnfavourite,
    LevelPlay,
    LevelTag,
    LevelTeamPick,
    ScoreSubmit,
    PhotoUpload,
    LevelRate,
    ReviewPost,
    CommentPost,
    PlaylistCreate,
    PinUnlock,
    LevelModerated,
    PhotoModerated,
    FirstLogin,
    ProfileUpdate,
}

impl EventKind {
    /// Custom kinds exist for the website/API only. The game client has no
    /// representation for them, so game queries must not receive them.
    pub fn is_custom(&self) -> bool {
        matches!(self, EventKind::FirstLogin | EventKind::ProfileUpdate)
    }
}

/// Visibility tier of an event. `DeletedObjectActivity` is the fallback
/// classification applied upstream once the referenced object is gone.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventOverType {
    Activity,
    Moderation,
    DeletedObjectActivity,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub kind: EventKind,
    pub actor: Uuid,
    /// Secondary party, e.g. the hearted user or the owner of moderated
    /// content
    pub involved_user: Option<Uuid>,
    pub over_type: EventOverType,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub data: StoredData,
    /// Free text, mostly moderation reasons
    pub description: Option<String>,
    /// Distinguishes "edited" from "created" for kinds that fire on both
    pub is_modified: bool,
    /// The actor opted to hide this event from everyone else
    pub is_private: bool,
}

impl DatabaseClient {
    /// Chronological slice of the event log, oldest first. Optional actor and
    /// level filters narrow the query.
    pub async fn events_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        actor: Option<Uuid>,
        level: Option<i32>,
        limit: u32,
    ) -> Result<Vec<Event>, AppError> {
        let actor_thing: Option<Thing> = actor.map(|id| object_thing("user", &id));
        let level_thing: Option<Thing> = level.map(|id| numerical_thing("level", id));
        let events: Vec<Event> = self
            .db
            .query(
                "
                SELECT *, meta::id(id) AS id
                FROM event
                WHERE timestamp >= $start
                    AND timestamp <= $end
                    AND ($actor = none OR actor = $actor)
                    AND ($level = none OR level = $level)
                ORDER BY timestamp ASC
                LIMIT $limit;
                ",
            )
            .bind(("start", Datetime::from(start)))
            .bind(("end", Datetime::from(end)))
            .bind(("actor", actor_thing))
            .bind(("level", level_thing))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(events)
    }
}
