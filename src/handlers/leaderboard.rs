use std::hash::Hash;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    Json,
};
use cached::Cached;
use schemars::JsonSchema;
use serde::Serialize;

use crate::{
    custom_cache::CustomCache,
    error::AppError,
    feed::ranking::{rank_scores, RankedScore},
    handlers::{PaginationQuery, PathLevelId},
    AppState,
};

pub struct LeaderboardCache<K: Hash + Eq + Clone, V: Clone> {
    /// In theory, it's better to use RwLock here, but [`CustomCache::cache_get`]
    /// takes &mut self reference, so we can't separate read and write operations
    cache: Mutex<CustomCache<K, Vec<V>>>,
}

impl<K: Hash + Eq + Clone, V: Clone> LeaderboardCache<K, V> {
    pub fn new(expire_in: u32) -> Self {
        Self {
            cache: Mutex::new(CustomCache::new(expire_in)),
        }
    }
    pub fn cached_query(
        &self,
        key: &K,
        start: u32,
        limit: u32,
    ) -> Result<Option<Vec<V>>, AppError> {
        let mut locked_cache = self.cache.lock().map_err(|_| AppError::Mutex)?;
        let Some(leaderboard) = locked_cache.cache_get(key) else {
            return Ok(None);
        };
        Ok(Some(
            leaderboard
                .iter()
                .skip(start as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
        ))
    }

    pub fn add_leaderboard(&self, key: &K, leaderboard: Vec<V>) -> Result<(), AppError> {
        let mut locked_cache = self.cache.lock().map_err(|_| AppError::Mutex)?;
        locked_cache.cache_set(key.clone(), leaderboard);
        Ok(())
    }
}

#[derive(Clone, Serialize, JsonSchema)]
pub struct LeaderboardResponse {
    leaderboard: Vec<RankedScore>,
}

/// Ranked scores of one level, tie-aware. The full ranking is cached, the
/// response is sliced from it.
pub async fn get_level_leaderboard(
    Path(level_path): Path<PathLevelId>,
    Query(query): Query<PaginationQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let level_id = level_path.value;
    if let Some(leaderboard) =
        state
            .leaderboard_cache
            .cached_query(&level_id, query.start, query.limit)?
    {
        return Ok(Json(LeaderboardResponse { leaderboard }));
    }

    if state.db.levels_by_ids(&[level_id]).await?.is_empty() {
        return Err(AppError::MissingLevel(level_id));
    }

    let scores = state.db.level_scores(level_id).await?;
    let mut leaderboard = rank_scores(scores);
    leaderboard.shrink_to_fit();

    let limited_leaderboard = leaderboard
        .iter()
        .skip(query.start as usize)
        .take(query.limit as usize)
        .cloned()
        .collect();

    state
        .leaderboard_cache
        .add_leaderboard(&level_id, leaderboard)?;
    Ok(Json(LeaderboardResponse {
        leaderboard: limited_leaderboard,
    }))
}
