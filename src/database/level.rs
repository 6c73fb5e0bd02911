use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use uuid::Uuid;

use crate::error::AppError;

use super::{numerical_thing, DatabaseClient};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Level {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub publisher: Uuid,
    pub icon_hash: String,
    pub publish_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl DatabaseClient {
    pub async fn levels_by_ids(&self, ids: &[i32]) -> Result<Vec<Level>, AppError> {
        let things: Vec<Thing> = ids.iter().map(|id| numerical_thing("level", *id)).collect();
        let levels: Vec<Level> = self
            .db
            .query(
                "
                SELECT *, meta::id(id) AS id
                FROM level
                WHERE id INSIDE $ids;
                ",
            )
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(levels)
    }
}
