//! Turns router outcomes and errors into reply text.

use crate::consts::{DUE_FORMAT, DUE_FORMAT_HINT};
use crate::error::BotError;
use crate::menu;
use crate::task::Task;

use super::{Outcome, Reply};

pub fn outcome(outcome: &Outcome) -> Reply {
    match outcome {
        Outcome::Greeting => Reply {
            text: "Hi! I keep track of your tasks.\nPick an action from the menu below:".to_string(),
            show_menu: true,
        },
        Outcome::Help => Reply::text(menu::help_text()),
        Outcome::AddPrompt => Reply::text(format!(
            "Send the task in the form:\n\nTask / 2024-12-31 18:30\n\nThe date ({DUE_FORMAT_HINT}) is optional."
        )),
        Outcome::Added { text, due_at, .. } => {
            let mut reply = format!("Task added: {text}");
            if let Some(due) = due_at {
                reply.push_str(&format!("\nDue: {}", due.format(DUE_FORMAT)));
            }
            Reply::text(reply)
        }
        Outcome::Listing { title, tasks } => Reply::text(task_list(title, tasks)),
        Outcome::MarkedDone(_) => Reply::text("Task marked as done! ✅"),
        Outcome::Deleted(_) => Reply::text("Task deleted! 🗑️"),
        Outcome::UnknownCommand(cmd) => Reply::text(format!(
            "Unknown command: {cmd}\nType /help for available commands."
        )),
        Outcome::Empty => Reply::text("Send a task description, or /help for commands."),
    }
}

/// User-facing text for an error. Storage details never leak.
pub fn error(err: &BotError) -> Reply {
    let text = match err {
        BotError::InvalidDateFormat { .. } => {
            format!("Invalid date format. Use: {DUE_FORMAT_HINT}")
        }
        BotError::InvalidCommandFormat { .. } => "Invalid command format.".to_string(),
        BotError::EmptyTask => "The task description is empty.".to_string(),
        BotError::NotFoundOrNotOwned { .. } => "Task not found.".to_string(),
        BotError::Storage(_) => "Something went wrong, please try again later.".to_string(),
    };
    Reply::text(text)
}

pub fn task_list(title: &str, tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks.".to_string();
    }
    let mut out = format!("{title}\n\n");
    for task in tasks {
        out.push_str(&task_line(task));
        out.push('\n');
    }
    out
}

pub fn task_line(task: &Task) -> String {
    let status = if task.is_done { "✅" } else { "⏳" };
    let due = task
        .due_at
        .map(|d| format!(" ({})", d.format(DUE_FORMAT)))
        .unwrap_or_default();
    format!(
        "{status} {}{due} [/done{id}] [/del{id}]",
        task.text,
        id = task.id
    )
}
