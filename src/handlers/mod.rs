use schemars::JsonSchema;
use serde::Deserialize;

pub mod activity;
pub mod auth;
pub mod leaderboard;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PaginationQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub start: u32,
}
fn default_limit() -> u32 {
    100
}

// needed for aide documentation
#[derive(Deserialize, JsonSchema)]
pub struct PathLevelId {
    #[serde(rename = "level_id")]
    pub value: i32,
}
