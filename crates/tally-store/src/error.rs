use chrono::NaiveDate;

/// Errors from timesheet store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An entry for the same user, project, and calendar day already exists.
    #[error("duplicate entry for user {user_id}, project {project_id} on {date}")]
    Duplicate {
        user_id: i32,
        project_id: i32,
        date: NaiveDate,
    },

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
