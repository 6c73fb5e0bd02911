use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use uuid::Uuid;

use crate::error::AppError;

use super::{numerical_thing, DatabaseClient};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: i32,
    pub taken_by: Uuid,
    /// Unset for photos taken on a planet or in a level that was deleted
    pub level_id: Option<i32>,
    pub small_hash: String,
    pub large_hash: String,
    pub taken_at: DateTime<Utc>,
}

impl DatabaseClient {
    pub async fn photos_by_ids(&self, ids: &[i32]) -> Result<Vec<Photo>, AppError> {
        let things: Vec<Thing> = ids.iter().map(|id| numerical_thing("photo", *id)).collect();
        let photos: Vec<Photo> = self
            .db
            .query(
                "
                SELECT *, meta::id(id) AS id
                FROM photo
                WHERE id INSIDE $ids;
                ",
            )
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(photos)
    }
}
