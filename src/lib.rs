use std::sync::Arc;

use aide::axum::routing::{get_with, post_with};
use aide::axum::ApiRouter;
use axum::middleware;
use database::DatabaseClient;
use feed::ranking::RankedScore;
use handlers::leaderboard::LeaderboardCache;
use jwt::JwtUtil;

pub mod custom_cache;
pub mod database;
pub mod documentation;
pub mod error;
pub mod feed;
pub mod handlers;
pub mod jwt;

pub struct AppState {
    pub db: DatabaseClient,
    pub jwt: JwtUtil,
    pub leaderboard_cache: LeaderboardCache<i32, RankedScore>,
}

impl AppState {
    pub async fn new() -> AppState {
        AppState {
            db: DatabaseClient::new()
                .await
                .expect("failed to initialize db connection"),
            jwt: JwtUtil::new_jwt(),
            leaderboard_cache: LeaderboardCache::new(600),
        }
    }
}

pub fn routes(state: Arc<AppState>) -> ApiRouter<Arc<AppState>> {
    let game_routes = ApiRouter::new()
        .api_route(
            "/activity/game",
            get_with(handlers::activity::get_game_activity, |op| {
                op.tag("Activity")
            }),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::auth::check_jwt_token,
        ));
    let public_routes = ApiRouter::new()
        .api_route(
            "/activity",
            get_with(handlers::activity::get_api_activity, |op| {
                op.tag("Activity")
            }),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            handlers::auth::attach_jwt_token_if_present,
        ));
    game_routes
        .merge(public_routes)
        .api_route(
            "/leaderboard/:level_id",
            get_with(handlers::leaderboard::get_level_leaderboard, |op| {
                op.tag("Leaderboard")
            }),
        )
        .api_route(
            "/oauth/admin",
            post_with(handlers::auth::admin_login, |op| op.tag("Auth")),
        )
        .api_route(
            "/oauth/logout",
            get_with(handlers::auth::logout, |op| op.tag("Auth")),
        )
}
