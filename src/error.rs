//! Error types for the store and the message router.

use thiserror::Error;

use crate::task::TaskId;

/// Failures of the persistence layer. Never used for "not found".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("task {id} has an unreadable {column}: {value:?}")]
    CorruptRow {
        id: TaskId,
        column: &'static str,
        value: String,
    },

    #[error("task text must not be empty")]
    EmptyText,

    #[error("database connection lock poisoned")]
    Poisoned,
}

/// Everything that can go wrong while handling one inbound message.
///
/// All variants except [`BotError::Storage`] are caused by user input and are
/// turned into a reply. Storage failures are logged and answered with a
/// generic message.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("invalid due date {input:?}, expected YYYY-MM-DD HH:MM")]
    InvalidDateFormat { input: String },

    #[error("invalid command {input:?}")]
    InvalidCommandFormat { input: String },

    #[error("task description is empty")]
    EmptyTask,

    #[error("task {id} not found")]
    NotFoundOrNotOwned { id: TaskId },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl BotError {
    /// True when the message was malformed, as opposed to the system failing.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, BotError::Storage(_))
    }
}
