use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing level {0}")]
    MissingLevel(i32),

    #[error("Missing user {0}")]
    MissingUser(uuid::Uuid),

    #[error("Missing user_token cookie")]
    MissingTokenCookie,

    #[error("Jwt verification error")]
    JwtVerification,

    #[error("Wrong admin password")]
    WrongAdminPassword,

    #[error("Poisoned lock")]
    Mutex,

    #[error("Unhandled surrealdb error: {0}")]
    UnhandledDb(#[from] surrealdb::Error),

    #[error("Unhandled Jwt error: {0}")]
    Jwt(#[from] jwt_simple::Error),
}

// aide needs this to accept fallible handlers in documented routes
impl aide::OperationOutput for AppError {
    type Inner = Self;
}

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorMessage {
            message: self.to_string(),
        });
        let status_code = match self {
            AppError::UnhandledDb(_) | AppError::Jwt(_) | AppError::Mutex => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::MissingTokenCookie | AppError::JwtVerification => StatusCode::UNAUTHORIZED,
            AppError::WrongAdminPassword => StatusCode::FORBIDDEN,
            AppError::MissingLevel(_) | AppError::MissingUser(_) => StatusCode::NOT_FOUND,
        };
        (status_code, body).into_response()
    }
}
