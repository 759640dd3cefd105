use thiserror::Error;

/// Failure taxonomy shared by the store and the aggregators.
///
/// Ownership mismatches deliberately surface as [`AppError::NotFound`] so a
/// caller can never learn that a diet id exists under another user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    /// Any storage failure, including one that aborted a multi-statement
    /// transaction. By the time this is observed the transaction has
    /// already been rolled back.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;
