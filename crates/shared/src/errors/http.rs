use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::SessionNotFound => HttpError::NotFound("Session not found".into()),

            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("Invalid email or password".into())
            }

            ServiceError::Unauthorized(msg) => HttpError::Unauthorized(msg),

            ServiceError::Conflict(msg) => HttpError::Conflict(msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) | RepositoryError::AlreadyExists(msg) => {
                    HttpError::Conflict(msg)
                }
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Foreign key violation: {msg}"))
                }
                other => {
                    error!("❌ Unhandled repository error: {other:?}");
                    HttpError::Internal("Internal server error".into())
                }
            },

            ServiceError::Bcrypt(err) => {
                error!("❌ Password hashing failed: {err:?}");
                HttpError::Internal("Internal authentication error".into())
            }

            ServiceError::Upstream(msg) => HttpError::BadGateway(msg),

            ServiceError::Internal(msg) => {
                error!("❌ Internal error: {msg}");
                HttpError::Internal("Internal server error".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        let msg = match self {
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::BadGateway(msg)
            | HttpError::Internal(msg) => msg,
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}
