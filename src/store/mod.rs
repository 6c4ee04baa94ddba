pub mod sqlite;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

use crate::error::StoreError;
use crate::task::{OwnerId, Period, Task, TaskId};

/// Outcome of an ownership-scoped mutation.
///
/// A missing id and an id owned by someone else both report `NotFound`,
/// so callers cannot probe other users' tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
}

/// Persistent task records. Could be SQLite, in-memory, etc.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a pending task and return its new id.
    async fn add_task(
        &self,
        owner_id: OwnerId,
        text: &str,
        due_at: Option<NaiveDateTime>,
    ) -> Result<TaskId, StoreError>;

    /// The owner's tasks in `period`, undated first, then by due date.
    async fn list_tasks(&self, owner_id: OwnerId, period: Period)
    -> Result<Vec<Task>, StoreError>;

    /// Mark a task done. Idempotent.
    async fn mark_done(&self, task_id: TaskId, owner_id: OwnerId) -> Result<Mutation, StoreError>;

    async fn delete_task(&self, task_id: TaskId, owner_id: OwnerId)
    -> Result<Mutation, StoreError>;
}

/// Source of "now" for creation stamps and the today/tomorrow filters.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The server's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant. For tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_instant() {
        let at = NaiveDateTime::parse_from_str("2024-05-01 09:15", "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn local_clock_is_close_to_local_now() {
        let before = Local::now().naive_local();
        let now = LocalClock.now();
        let after = Local::now().naive_local();
        assert!(before <= now && now <= after);
    }
}
