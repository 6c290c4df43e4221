use crate::auth::password::PasswordError;
use crate::models::common::OrderStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Already exists: {0}")]
    Duplicate(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Restaurant pending approval for account {0}")]
    PendingApproval(i32),
    #[error("Account {0} no longer exists")]
    AccountNotFound(i32),
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order {0} was updated concurrently")]
    StaleStatus(i32),
    #[error("Password error: {0}")]
    PasswordHash(#[from] PasswordError),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
}

impl RepositoryError {
    /// Maps a unique-constraint violation to `Duplicate`, everything else to
    /// `DatabaseError`.
    pub(crate) fn from_insert(e: diesel::result::Error, what: &str) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                RepositoryError::Duplicate(what.to_string())
            }
            other => RepositoryError::DatabaseError(other),
        }
    }
}
