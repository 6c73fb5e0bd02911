use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use uuid::Uuid;

use crate::error::AppError;

use super::{object_thing, DatabaseClient};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub icon_hash: String,
    pub description: String,
    pub join_date: DateTime<Utc>,
}

impl DatabaseClient {
    /// Batch lookup. Ids that don't exist anymore are simply absent from the
    /// result, deleted accounts are expected.
    pub async fn users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, AppError> {
        let things: Vec<Thing> = ids.iter().map(|id| object_thing("user", id)).collect();
        let users: Vec<User> = self
            .db
            .query(
                "
                SELECT *, meta::id(id) AS id
                FROM user
                WHERE id INSIDE $ids;
                ",
            )
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(users)
    }
}
