use async_trait::async_trait;
use surrealdb::{
    engine::remote::ws::{Client, Ws, Wss},
    opt::auth::Root,
    sql::{Id, Thing},
    Surreal,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    feed::objects::ObjectStore,
};

pub mod event;
pub mod level;
pub mod photo;
pub mod score;
pub mod user;

pub struct DatabaseClient {
    db: Surreal<Client>,
}

impl DatabaseClient {
    pub async fn new() -> Result<DatabaseClient, AppError> {
        let url = std::env::var("SURREAL_URL").expect("Missing SURREAL_URL environment variable");

        let client = if url.starts_with("wss://") {
            Surreal::new::<Wss>(
                url.strip_prefix("wss://")
                    .expect("starts_with ensures this"),
            )
            .await?
        } else if url.starts_with("ws://") {
            Surreal::new::<Ws>(url.strip_prefix("ws://").expect("starts_with ensures this")).await?
        } else {
            panic!("Badly formatted SURREAL_URL environment variable. Inlude full url with protocol (ws or wss)")
        };

        client
            .signin(Root {
                username: &std::env::var("SURREAL_USER")
                    .expect("Missing SURREAL_USER environment variable"),
                password: &std::env::var("SURREAL_PASS")
                    .expect("Missing SURREAL_PASS envrionment variable"),
            })
            .await?;
        client.use_ns("playhub").use_db("playhub").await?;
        Ok(DatabaseClient { db: client })
    }
}

pub fn numerical_thing(table: &str, number: i32) -> Thing {
    Thing::from((table, Id::Number(number.into())))
}

pub fn object_thing(table: &str, id: &Uuid) -> Thing {
    Thing::from((table, Id::String(id.to_string())))
}

#[async_trait]
impl ObjectStore for DatabaseClient {
    async fn resolve_users(&self, ids: &[Uuid]) -> Result<Vec<user::User>, AppError> {
        self.users_by_ids(ids).await
    }
    async fn resolve_levels(&self, ids: &[i32]) -> Result<Vec<level::Level>, AppError> {
        self.levels_by_ids(ids).await
    }
    async fn resolve_scores(&self, ids: &[Uuid]) -> Result<Vec<score::Score>, AppError> {
        self.scores_by_ids(ids).await
    }
    async fn resolve_photos(&self, ids: &[i32]) -> Result<Vec<photo::Photo>, AppError> {
        self.photos_by_ids(ids).await
    }
}
