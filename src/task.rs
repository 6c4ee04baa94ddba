//! The task record and the period filter used to list tasks.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// Chat user identifier. Scopes every query and mutation.
pub type OwnerId = i64;

/// A single task as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: OwnerId,
    pub text: String,
    /// Deadline with minute precision. `None` means no deadline.
    pub due_at: Option<NaiveDateTime>,
    /// Only ever goes from `false` to `true`.
    pub is_done: bool,
    pub created_at: NaiveDateTime,
}

/// Narrows a listing by due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Every task of the owner, dated or not.
    #[default]
    All,
    /// Tasks due on the current local date.
    Today,
    /// Tasks due on the day after the current local date.
    Tomorrow,
}

impl Period {
    /// The calendar date this period selects, given today's date.
    /// `None` for [`Period::All`], which selects by owner only.
    pub fn target_date(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::All => None,
            Period::Today => Some(today),
            Period::Tomorrow => today.succ_opt(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Today => "today",
            Period::Tomorrow => "tomorrow",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period: {0} (expected all, today or tomorrow)")]
pub struct UnknownPeriod(pub String);

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "today" => Ok(Period::Today),
            "tomorrow" => Ok(Period::Tomorrow),
            _ => Err(UnknownPeriod(s.to_string())),
        }
    }
}
