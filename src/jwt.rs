use jwt_simple::{
    algorithms::{HS256Key, MACLike},
    claims::Claims,
    reexports::coarsetime::Duration,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Serialize, Deserialize, Clone)]
pub struct AuthData {
    pub user_id: Uuid,
    pub username: String,
    /// Grants visibility into moderation events. Resolved at token creation,
    /// never re-derived by the feed engine.
    pub moderator: bool,
}

pub struct JwtUtil {
    pub key: HS256Key,
}
impl JwtUtil {
    pub fn new_jwt() -> JwtUtil {
        let key_str =
            std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY env variable is not set");
        let key = HS256Key::from_bytes(key_str.as_bytes());

        JwtUtil { key }
    }

    pub fn create_jwt(
        &self,
        user_id: Uuid,
        username: String,
        moderator: bool,
        duration: u32,
    ) -> Result<String, AppError> {
        let additional_data = AuthData {
            user_id,
            username,
            moderator,
        };
        let claims =
            Claims::with_custom_claims(additional_data, Duration::from_secs(duration.into()));
        let token = self.key.authenticate(claims)?;
        Ok(token)
    }

    pub fn verify_jwt(&self, token: &str) -> Result<AuthData, AppError> {
        let claims = self.key.verify_token::<AuthData>(token, None)?;
        Ok(claims.custom)
    }
}
