use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    feed::{self, window, ActivityPage, QuerySource, ViewerContext},
    jwt::AuthData,
    AppState,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ActivityQuery {
    /// Upper bound of the page window in unix milliseconds. Defaults to now.
    #[serde(default)]
    timestamp: Option<i64>,
    /// Only events by this user
    #[serde(default)]
    actor: Option<Uuid>,
    /// Only events on this level
    #[serde(default)]
    level: Option<i32>,
    #[serde(default = "default_event_limit")]
    limit: u32,
}
fn default_event_limit() -> u32 {
    500
}

#[derive(Serialize, JsonSchema)]
pub struct ActivityResponse {
    #[serde(flatten)]
    page: ActivityPage,
    /// Pass this back as `timestamp` to page further into the past. Carries
    /// the empty-page sentinel once the log is exhausted.
    next_page_end: DateTime<Utc>,
}

async fn build_page(
    state: &AppState,
    viewer: ViewerContext,
    query: ActivityQuery,
) -> Result<ActivityResponse, AppError> {
    let end = query
        .timestamp
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(Utc::now);
    let start = end - Duration::days(window::PAGE_LOOKBACK_DAYS);

    let events = state
        .db
        .events_in_range(start, end, query.actor, query.level, query.limit)
        .await?;
    let page = feed::build_activity_page(&state.db, events, &viewer).await?;

    Ok(ActivityResponse {
        next_page_end: page.next_page_end(),
        page,
    })
}

/// Website/API feed. Anonymous callers are fine, a valid cookie only widens
/// what the page may contain.
pub async fn get_api_activity(
    Query(query): Query<ActivityQuery>,
    State(state): State<Arc<AppState>>,
    auth: Option<Extension<AuthData>>,
) -> Result<Json<ActivityResponse>, AppError> {
    let viewer = match auth {
        Some(Extension(auth)) => ViewerContext {
            user_id: Some(auth.user_id),
            source: QuerySource::Api,
            is_staff: auth.moderator,
        },
        None => ViewerContext::anonymous(QuerySource::Api),
    };
    let response = build_page(&state, viewer, query).await?;
    Ok(Json(response))
}

/// In-game recent activity. Requires a token, and custom event kinds the
/// game can't display are filtered out by the engine.
pub async fn get_game_activity(
    Query(query): Query<ActivityQuery>,
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthData>,
) -> Result<Json<ActivityResponse>, AppError> {
    let viewer = ViewerContext {
        user_id: Some(auth.user_id),
        source: QuerySource::Game,
        is_staff: auth.moderator,
    };
    let response = build_page(&state, viewer, query).await?;
    Ok(Json(response))
}
