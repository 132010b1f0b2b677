use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Lookups that found nothing, as opposed to failures of the store itself
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }
}

/// Implement From for sea_orm::DbErr
impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Store(err.to_string())
    }
}

/// A background store call that panicked or was aborted
impl From<tokio::task::JoinError> for TaskError {
    fn from(err: tokio::task::JoinError) -> Self {
        TaskError::Internal(format!("Background store call failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for TaskError {
    fn from(err: validator::ValidationErrors) -> Self {
        TaskError::Validation(err.to_string())
    }
}
