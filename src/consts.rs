//! Project-wide constants.

use std::path::PathBuf;

/// Separator between a task description and its due date.
pub const DUE_SEPARATOR: &str = " / ";

/// Format users type due dates in, and the format `due_at` is stored in.
pub const DUE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Human-readable form of [`DUE_FORMAT`] for error replies.
pub const DUE_FORMAT_HINT: &str = "YYYY-MM-DD HH:MM";

/// Storage format for `created_at`, matching SQLite's `CURRENT_TIMESTAMP`.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How long a write waits for another process holding the database lock.
pub const BUSY_TIMEOUT_SECS: u64 = 5;

/// Owner id used by the terminal transport when none is given.
pub const DEFAULT_OWNER_ID: i64 = 1;

/// Default database path: `~/.taskbot/tasks.db`.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskbot")
        .join("tasks.db")
}
