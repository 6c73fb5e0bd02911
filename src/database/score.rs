use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use uuid::Uuid;

use crate::error::AppError;

use super::{numerical_thing, object_thing, DatabaseClient};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub id: Uuid,
    pub level_id: i32,
    pub player: Uuid,
    pub score: i32,
    /// 1 for solo scores, 2-4 for the versus player counts
    pub score_type: u8,
    pub submitted_at: DateTime<Utc>,
}

impl DatabaseClient {
    pub async fn scores_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Score>, AppError> {
        let things: Vec<Thing> = ids.iter().map(|id| object_thing("score", id)).collect();
        let scores: Vec<Score> = self
            .db
            .query(
                "
                SELECT *, meta::id(id) AS id
                FROM score
                WHERE id INSIDE $ids;
                ",
            )
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(scores)
    }

    /// Every score submitted to a level, unordered. Ranking happens in
    /// [`crate::feed::ranking`], not in the query.
    pub async fn level_scores(&self, level_id: i32) -> Result<Vec<Score>, AppError> {
        let scores: Vec<Score> = self
            .db
            .query(
                "
                SELECT *, meta::id(id) AS id
                FROM score
                WHERE level = $level;
                ",
            )
            .bind(("level", numerical_thing("level", level_id)))
            .await?
            .take(0)?;
        Ok(scores)
    }
}
