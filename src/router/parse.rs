//! Free-text parsing: task text with an optional due date, and task ids in
//! `/done<id>` / `/del<id>` commands.

use chrono::NaiveDateTime;

use crate::consts::{DUE_FORMAT, DUE_SEPARATOR};
use crate::error::BotError;
use crate::task::TaskId;

/// A task description split from its optional due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    pub due_at: Option<NaiveDateTime>,
}

/// Split `text` on the first `" / "` into a description and a due date.
///
/// A non-empty date part that is not `YYYY-MM-DD HH:MM` is an error; the
/// task is never created without the date the user asked for.
pub fn parse_task_text(text: &str) -> Result<NewTask, BotError> {
    let (description, due_at) = match text.split_once(DUE_SEPARATOR) {
        Some((description, date_part)) => {
            let date_part = date_part.trim();
            let due_at = if date_part.is_empty() {
                None
            } else {
                Some(parse_due(date_part)?)
            };
            (description.trim(), due_at)
        }
        None => (text.trim(), None),
    };

    if description.is_empty() {
        return Err(BotError::EmptyTask);
    }

    Ok(NewTask {
        description: description.to_string(),
        due_at,
    })
}

/// Parse a user-typed due date (`YYYY-MM-DD HH:MM`, 24-hour, zero-padded).
///
/// chrono alone accepts a sign on the year and no space before the time,
/// so the shape is checked first.
pub fn parse_due(input: &str) -> Result<NaiveDateTime, BotError> {
    let invalid = || BotError::InvalidDateFormat {
        input: input.to_string(),
    };
    if !has_due_shape(input) {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(input, DUE_FORMAT).map_err(|_| invalid())
}

fn has_due_shape(input: &str) -> bool {
    const SHAPE: &[u8] = b"dddd-dd-dd dd:dd";
    let bytes = input.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE).all(|(&b, &s)| match s {
            b'd' => b.is_ascii_digit(),
            _ => b == s,
        })
}

/// Parse the digits following `/done` or `/del`.
///
/// One or more ASCII digits and nothing else; no sign. `None` on an empty
/// suffix, any other character, or overflow.
pub fn parse_task_id(suffix: &str) -> Option<TaskId> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
