use async_trait::async_trait;
use futures::try_join;
use hashlink::LinkedHashMap;
use itertools::Itertools;
use uuid::Uuid;

use crate::{
    database::{
        event::{Event, StoredData},
        level::Level,
        photo::Photo,
        score::Score,
        user::User,
    },
    error::AppError,
};

/// Read-only batch lookups against the backing store. Every method tolerates
/// missing ids and returns only the objects that still exist.
#[async_trait]
pub trait ObjectStore: Sync {
    async fn resolve_users(&self, ids: &[Uuid]) -> Result<Vec<User>, AppError>;
    async fn resolve_levels(&self, ids: &[i32]) -> Result<Vec<Level>, AppError>;
    async fn resolve_scores(&self, ids: &[Uuid]) -> Result<Vec<Score>, AppError>;
    async fn resolve_photos(&self, ids: &[i32]) -> Result<Vec<Photo>, AppError>;
}

/// Everything a batch of events points at, deduplicated by the objects' own
/// identity. Built fresh for every page and thrown away with it.
#[derive(Debug, Default)]
pub struct ReferencedObjects {
    pub users: LinkedHashMap<Uuid, User>,
    pub levels: LinkedHashMap<i32, Level>,
    pub scores: LinkedHashMap<Uuid, Score>,
    pub photos: LinkedHashMap<i32, Photo>,
}

impl ReferencedObjects {
    pub async fn resolve<S: ObjectStore>(
        store: &S,
        events: &[Event],
    ) -> Result<ReferencedObjects, AppError> {
        let mut user_ids: Vec<Uuid> = Vec::new();
        let mut level_ids: Vec<i32> = Vec::new();
        let mut score_ids: Vec<Uuid> = Vec::new();
        let mut photo_ids: Vec<i32> = Vec::new();

        for event in events {
            // actor and involved party are wanted no matter what the event
            // itself references
            user_ids.push(event.actor);
            if let Some(involved) = event.involved_user {
                user_ids.push(involved);
            }
            match event.data {
                StoredData::User(id) => user_ids.push(id),
                StoredData::Level(id) => level_ids.push(id),
                StoredData::Score(id) => score_ids.push(id),
                StoredData::Photo(id) => photo_ids.push(id),
                // no lookup implemented for these yet, same gap as grouping
                _ => {}
            }
        }

        let user_ids: Vec<Uuid> = user_ids.into_iter().unique().collect();
        let level_ids: Vec<i32> = level_ids.into_iter().unique().collect();
        let score_ids: Vec<Uuid> = score_ids.into_iter().unique().collect();
        let photo_ids: Vec<i32> = photo_ids.into_iter().unique().collect();

        let (users, levels, scores, photos) = try_join!(
            store.resolve_users(&user_ids),
            store.resolve_levels(&level_ids),
            store.resolve_scores(&score_ids),
            store.resolve_photos(&photo_ids),
        )?;

        let mut objects = ReferencedObjects::default();
        for user in users {
            objects.users.insert(user.id, user);
        }
        for level in levels {
            objects.levels.insert(level.id, level);
        }
        for score in scores {
            objects.scores.insert(score.id, score);
        }
        for photo in photos {
            objects.photos.insert(photo.id, photo);
        }

        // Photos carry their level and score events group under their level,
        // neither of which the events themselves reference. Pull those levels
        // in with a second pass.
        let extra_level_ids: Vec<i32> = objects
            .photos
            .values()
            .filter_map(|photo| photo.level_id)
            .chain(objects.scores.values().map(|score| score.level_id))
            .unique()
            .filter(|id| !objects.levels.contains_key(id))
            .collect();
        if !extra_level_ids.is_empty() {
            for level in store.resolve_levels(&extra_level_ids).await? {
                objects.levels.insert(level.id, level);
            }
        }

        Ok(objects)
    }
}
