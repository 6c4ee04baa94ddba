//! SQLite-backed task store.
//!
//! Dates are kept as text so SQLite's `date()` can filter on them:
//! `due_at` as `YYYY-MM-DD HH:MM`, `created_at` as `YYYY-MM-DD HH:MM:SS`.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::{Connection, params};
use tracing::debug;

use super::{Clock, LocalClock, Mutation, TaskStore};
use crate::consts::{BUSY_TIMEOUT_SECS, CREATED_FORMAT, DUE_FORMAT};
use crate::error::StoreError;
use crate::task::{OwnerId, Period, Task, TaskId};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id   INTEGER NOT NULL,
        text       TEXT NOT NULL,
        due_at     TEXT,
        is_done    INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_tasks_owner ON tasks (owner_id);";

// NULL due dates sort first under ascending order.
const SELECT_ALL: &str = "SELECT id, owner_id, text, due_at, is_done, created_at
     FROM tasks WHERE owner_id = ?1
     ORDER BY due_at ASC, id ASC";

const SELECT_ON_DATE: &str = "SELECT id, owner_id, text, due_at, is_done, created_at
     FROM tasks WHERE owner_id = ?1 AND date(due_at) = ?2
     ORDER BY due_at ASC, id ASC";

/// A row as SQLite hands it back, before the date columns are decoded.
struct RawRow {
    id: TaskId,
    owner_id: OwnerId,
    text: String,
    due_at: Option<String>,
    is_done: bool,
    created_at: String,
}

impl RawRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            text: row.get(2)?,
            due_at: row.get(3)?,
            is_done: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_task(self) -> Result<Task, StoreError> {
        let due_at = match self.due_at {
            Some(raw) => Some(NaiveDateTime::parse_from_str(&raw, DUE_FORMAT).map_err(|_| {
                StoreError::CorruptRow {
                    id: self.id,
                    column: "due_at",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };
        let created_at =
            NaiveDateTime::parse_from_str(&self.created_at, CREATED_FORMAT).map_err(|_| {
                StoreError::CorruptRow {
                    id: self.id,
                    column: "created_at",
                    value: self.created_at.clone(),
                }
            })?;
        Ok(Task {
            id: self.id,
            owner_id: self.owner_id,
            text: self.text,
            due_at,
            is_done: self.is_done,
            created_at,
        })
    }
}

/// SQLite-backed persistent task store.
pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl SqliteTaskStore {
    /// Open or create the task table in the given database.
    /// Use `":memory:"` for an ephemeral store.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Self::with_clock(path, Arc::new(LocalClock))
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    /// Open with an explicit clock, e.g. a [`FixedClock`](super::FixedClock) in tests.
    pub fn with_clock(path: &str, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS))?;
        conn.execute_batch(SCHEMA)?;
        debug!(path, "task store opened");
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn query_tasks(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Task>, StoreError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, RawRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawRow::into_task).collect()
    }
}

fn mutation(changed: usize) -> Mutation {
    if changed > 0 {
        Mutation::Applied
    } else {
        Mutation::NotFound
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn add_task(
        &self,
        owner_id: OwnerId,
        text: &str,
        due_at: Option<NaiveDateTime>,
    ) -> Result<TaskId, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let due = due_at.map(|d| d.format(DUE_FORMAT).to_string());
        let created = self.clock.now().format(CREATED_FORMAT).to_string();

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (owner_id, text, due_at, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![owner_id, text, due, created],
        )?;
        let id = conn.last_insert_rowid();
        debug!(owner_id, task_id = id, "task added");
        Ok(id)
    }

    async fn list_tasks(
        &self,
        owner_id: OwnerId,
        period: Period,
    ) -> Result<Vec<Task>, StoreError> {
        let today = self.clock.now().date();
        let conn = self.conn()?;
        if period == Period::All {
            return Self::query_tasks(&conn, SELECT_ALL, params![owner_id]);
        }
        match period.target_date(today) {
            Some(date) => {
                let date = date.format("%Y-%m-%d").to_string();
                Self::query_tasks(&conn, SELECT_ON_DATE, params![owner_id, date])
            }
            // Only reachable on the last representable day.
            None => Ok(Vec::new()),
        }
    }

    async fn mark_done(&self, task_id: TaskId, owner_id: OwnerId) -> Result<Mutation, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE tasks SET is_done = 1 WHERE id = ?1 AND owner_id = ?2",
            params![task_id, owner_id],
        )?;
        debug!(owner_id, task_id, changed, "mark done");
        Ok(mutation(changed))
    }

    async fn delete_task(
        &self,
        task_id: TaskId,
        owner_id: OwnerId,
    ) -> Result<Mutation, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2",
            params![task_id, owner_id],
        )?;
        debug!(owner_id, task_id, changed, "delete");
        Ok(mutation(changed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FixedClock;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DUE_FORMAT).unwrap()
    }

    fn store_at(now: &str) -> SqliteTaskStore {
        SqliteTaskStore::with_clock(":memory:", Arc::new(FixedClock(at(now)))).unwrap()
    }

    #[tokio::test]
    async fn created_at_comes_from_clock() {
        let store = store_at("2024-03-10 08:00");
        store.add_task(1, "stretch", None).await.unwrap();
        let tasks = store.list_tasks(1, Period::All).await.unwrap();
        assert_eq!(tasks[0].created_at, at("2024-03-10 08:00"));
    }

    #[tokio::test]
    async fn add_trims_text() {
        let store = store_at("2024-03-10 08:00");
        store.add_task(1, "  padded  ", None).await.unwrap();
        let tasks = store.list_tasks(1, Period::All).await.unwrap();
        assert_eq!(tasks[0].text, "padded");
    }

    #[tokio::test]
    async fn add_rejects_blank_text() {
        let store = store_at("2024-03-10 08:00");
        let err = store.add_task(1, "   ", None).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyText));
        assert!(store.list_tasks(1, Period::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn due_at_is_stored_at_minute_precision() {
        let store = store_at("2024-03-10 08:00");
        let id = store
            .add_task(1, "call", Some(at("2024-03-11 14:05")))
            .await
            .unwrap();
        let conn = store.conn().unwrap();
        let raw: String = conn
            .query_row("SELECT due_at FROM tasks WHERE id = ?1", [id], |r| r.get(0))
            .unwrap();
        assert_eq!(raw, "2024-03-11 14:05");
    }

    #[tokio::test]
    async fn corrupt_due_at_is_reported_not_skipped() {
        let store = store_at("2024-03-10 08:00");
        let id = store.add_task(1, "broken", None).await.unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "UPDATE tasks SET due_at = 'someday' WHERE id = ?1",
                [id],
            )
            .unwrap();
        let err = store.list_tasks(1, Period::All).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::CorruptRow { column: "due_at", .. }
        ));
    }

    #[tokio::test]
    async fn ties_on_due_date_keep_insertion_order() {
        let store = store_at("2024-03-10 08:00");
        let due = Some(at("2024-03-12 10:00"));
        let first = store.add_task(1, "first", due).await.unwrap();
        let second = store.add_task(1, "second", due).await.unwrap();
        let ids: Vec<_> = store
            .list_tasks(1, Period::All)
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let store = store_at("2024-03-10 08:00");
        store.conn().unwrap().execute_batch(SCHEMA).unwrap();
    }
}
