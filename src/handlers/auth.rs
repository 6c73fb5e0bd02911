use std::sync::{Arc, LazyLock};

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use http::{header::SET_COOKIE, HeaderMap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, AppState};

static ADMIN_PASSWORD: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_PASSWORD").expect("Missing ADMIN_PASSWORD environment variable")
});

/// To make local development easier, we set this flag in environment variables to set some cookie
/// attributes dynamically
static DEPLOY_COOKIE: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("DEPLOY_COOKIE").is_ok_and(|value| value.to_lowercase() == "true")
});

#[derive(Serialize, Deserialize, JsonSchema)]
pub struct AdminLogin {
    password: String,
    /// Id of the account to act as. Moderation visibility comes with the
    /// token, not the account.
    id: Uuid,
}

pub async fn logout() -> Response {
    let mut headers = HeaderMap::new();
    let mut user_token_cookie_string =
        "user_token=deleted;HttpOnly;Max-Age=-1;path=/;SameSite=lax".to_string();
    let mut logged_in_cookie_string = "logged_in=false;Max-Age=-1;path=/;SameSite=lax".to_string();
    if *DEPLOY_COOKIE {
        user_token_cookie_string += ";Secure;domain=.playhub.gg";
        logged_in_cookie_string += ";Secure;domain=.playhub.gg";
    }
    headers.append(SET_COOKIE, user_token_cookie_string.parse().unwrap());
    headers.append(SET_COOKIE, logged_in_cookie_string.parse().unwrap());
    headers.into_response()
}

pub async fn check_jwt_token(
    State(state): State<Arc<AppState>>,
    cookie_jar: CookieJar,
    mut request: Request,
    next: axum::middleware::Next,
) -> Result<Response, AppError> {
    let token = cookie_jar
        .get("user_token")
        .ok_or(AppError::MissingTokenCookie)?
        .value();
    let claims = state
        .jwt
        .verify_jwt(token)
        .map_err(|_| AppError::JwtVerification)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Like [`check_jwt_token`] but tolerant: anonymous callers pass through, a
/// valid token only widens what the route may show them.
pub async fn attach_jwt_token_if_present(
    State(state): State<Arc<AppState>>,
    cookie_jar: CookieJar,
    mut request: Request,
    next: axum::middleware::Next,
) -> Response {
    if let Some(cookie) = cookie_jar.get("user_token") {
        if let Ok(claims) = state.jwt.verify_jwt(cookie.value()) {
            request.extensions_mut().insert(claims);
        }
    }
    next.run(request).await
}

/// Easy way to get a moderator token without a full account flow. Account
/// issuance itself lives outside this service.
pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    Json(admin_login): Json<AdminLogin>,
) -> Result<String, AppError> {
    if *ADMIN_PASSWORD != admin_login.password {
        return Err(AppError::WrongAdminPassword);
    }

    let users = state.db.users_by_ids(&[admin_login.id]).await?;
    let user = users
        .into_iter()
        .next()
        .ok_or(AppError::MissingUser(admin_login.id))?;

    state.jwt.create_jwt(user.id, user.username, true, 84600)
}
