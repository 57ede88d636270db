use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl RepositoryError {
    /// Maps unique and foreign-key violations to their dedicated variants.
    pub fn from_constraint(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepositoryError::AlreadyExists(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKey(db_err.message().to_string());
            }
        }
        RepositoryError::Sqlx(err)
    }
}
