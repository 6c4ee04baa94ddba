//! Classifies inbound chat messages and dispatches them to the task store.
//!
//! The router is stateless: each message is classified by [`Router::classify`]
//! into an [`Intent`], executed by [`Router::dispatch`], and rendered into a
//! [`Reply`]. Transports only need [`Router::handle`].

pub mod parse;
pub mod render;

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, error};

use crate::error::BotError;
use crate::menu::{self, MenuAction};
use crate::store::{Mutation, TaskStore};
use crate::task::{OwnerId, Period, Task, TaskId};

/// A text event from the chat transport.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub owner_id: OwnerId,
    pub text: String,
}

impl InboundMessage {
    pub fn new(owner_id: OwnerId, text: impl Into<String>) -> Self {
        Self {
            owner_id,
            text: text.into(),
        }
    }
}

/// Text to send back, plus whether the transport should attach the menu keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub show_menu: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_menu: false,
        }
    }
}

/// What a message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Menu(MenuAction),
    MarkDone(TaskId),
    Delete(TaskId),
    /// Raw text to be parsed into a new task.
    AddTask(String),
    /// A `/done` or `/del` command without a valid id.
    InvalidCommand(String),
    UnknownCommand(String),
    Empty,
}

/// The result of a successfully handled intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Greeting,
    Help,
    AddPrompt,
    Added {
        id: TaskId,
        text: String,
        due_at: Option<NaiveDateTime>,
    },
    Listing {
        title: &'static str,
        tasks: Vec<Task>,
    },
    MarkedDone(TaskId),
    Deleted(TaskId),
    UnknownCommand(String),
    Empty,
}

pub struct Router {
    store: Arc<dyn TaskStore>,
}

impl Router {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Classify a message. Menu triggers win over everything else.
    pub fn classify(text: &str) -> Intent {
        let trimmed = text.trim();

        if let Some(action) = menu::lookup(trimmed) {
            return Intent::Menu(action);
        }
        if let Some(suffix) = trimmed.strip_prefix("/done") {
            return match parse::parse_task_id(suffix) {
                Some(id) => Intent::MarkDone(id),
                None => Intent::InvalidCommand(trimmed.to_string()),
            };
        }
        if let Some(suffix) = trimmed.strip_prefix("/del") {
            return match parse::parse_task_id(suffix) {
                Some(id) => Intent::Delete(id),
                None => Intent::InvalidCommand(trimmed.to_string()),
            };
        }
        if is_command(trimmed) {
            return Intent::UnknownCommand(trimmed.to_string());
        }
        if trimmed.is_empty() {
            return Intent::Empty;
        }
        Intent::AddTask(text.to_string())
    }

    /// Execute an intent on behalf of `owner_id`.
    pub async fn dispatch(&self, owner_id: OwnerId, intent: Intent) -> Result<Outcome, BotError> {
        match intent {
            Intent::Menu(action) => self.menu(owner_id, action).await,
            Intent::MarkDone(id) => match self.store.mark_done(id, owner_id).await? {
                Mutation::Applied => Ok(Outcome::MarkedDone(id)),
                Mutation::NotFound => Err(BotError::NotFoundOrNotOwned { id }),
            },
            Intent::Delete(id) => match self.store.delete_task(id, owner_id).await? {
                Mutation::Applied => Ok(Outcome::Deleted(id)),
                Mutation::NotFound => Err(BotError::NotFoundOrNotOwned { id }),
            },
            Intent::AddTask(text) => {
                let new = parse::parse_task_text(&text)?;
                let id = self
                    .store
                    .add_task(owner_id, &new.description, new.due_at)
                    .await?;
                Ok(Outcome::Added {
                    id,
                    text: new.description,
                    due_at: new.due_at,
                })
            }
            Intent::InvalidCommand(input) => Err(BotError::InvalidCommandFormat { input }),
            Intent::UnknownCommand(cmd) => Ok(Outcome::UnknownCommand(cmd)),
            Intent::Empty => Ok(Outcome::Empty),
        }
    }

    async fn menu(&self, owner_id: OwnerId, action: MenuAction) -> Result<Outcome, BotError> {
        let (title, period) = match action {
            MenuAction::Start => return Ok(Outcome::Greeting),
            MenuAction::Help => return Ok(Outcome::Help),
            MenuAction::AddPrompt => return Ok(Outcome::AddPrompt),
            MenuAction::ListAll => ("All tasks:", Period::All),
            MenuAction::ListToday => ("Tasks for today:", Period::Today),
            MenuAction::ListTomorrow => ("Tasks for tomorrow:", Period::Tomorrow),
            MenuAction::ListCompleted => {
                let tasks = self
                    .store
                    .list_tasks(owner_id, Period::All)
                    .await?
                    .into_iter()
                    .filter(|t| t.is_done)
                    .collect();
                return Ok(Outcome::Listing {
                    title: "Completed tasks:",
                    tasks,
                });
            }
        };
        let tasks = self.store.list_tasks(owner_id, period).await?;
        Ok(Outcome::Listing { title, tasks })
    }

    /// Handle one inbound message end to end. Never fails: errors become replies.
    pub async fn handle(&self, message: &InboundMessage) -> Reply {
        let intent = Self::classify(&message.text);
        debug!(owner_id = message.owner_id, ?intent, "classified message");

        match self.dispatch(message.owner_id, intent).await {
            Ok(outcome) => render::outcome(&outcome),
            Err(err) => {
                if err.is_user_error() {
                    debug!(owner_id = message.owner_id, %err, "rejected message");
                } else {
                    error!(owner_id = message.owner_id, %err, "failed to handle message");
                }
                render::error(&err)
            }
        }
    }
}

/// A `/` directly followed by a word, or a bare `/`. `"/ 2024-..."` is task text.
fn is_command(text: &str) -> bool {
    match text.strip_prefix('/') {
        Some(rest) => rest.chars().next().is_none_or(|c| !c.is_whitespace()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_with_digits() {
        assert_eq!(Router::classify("/done42"), Intent::MarkDone(42));
    }

    #[test]
    fn done_with_letters_is_invalid() {
        assert_eq!(
            Router::classify("/doneabc"),
            Intent::InvalidCommand("/doneabc".to_string())
        );
    }

    #[test]
    fn bare_done_and_del_are_invalid() {
        assert!(matches!(Router::classify("/done"), Intent::InvalidCommand(_)));
        assert!(matches!(Router::classify("/del"), Intent::InvalidCommand(_)));
    }

    #[test]
    fn del_with_digits() {
        assert_eq!(Router::classify("/del7"), Intent::Delete(7));
        assert_eq!(Router::classify("  /del7  "), Intent::Delete(7));
    }

    #[test]
    fn del_overflow_is_invalid() {
        assert!(matches!(
            Router::classify("/del99999999999999999999"),
            Intent::InvalidCommand(_)
        ));
    }

    #[test]
    fn menu_labels_and_names() {
        assert_eq!(
            Router::classify("📅 Today"),
            Intent::Menu(MenuAction::ListToday)
        );
        assert_eq!(Router::classify("/start"), Intent::Menu(MenuAction::Start));
    }

    #[test]
    fn period_names_are_list_commands() {
        assert_eq!(
            Router::classify(&format!("/{}", Period::All)),
            Intent::Menu(MenuAction::ListAll)
        );
        assert_eq!(
            Router::classify(&format!("/{}", Period::Today)),
            Intent::Menu(MenuAction::ListToday)
        );
        assert_eq!(
            Router::classify(&format!("/{}", Period::Tomorrow)),
            Intent::Menu(MenuAction::ListTomorrow)
        );
    }

    #[test]
    fn other_slash_text_is_unknown_command() {
        assert_eq!(
            Router::classify("/frobnicate"),
            Intent::UnknownCommand("/frobnicate".to_string())
        );
    }

    #[test]
    fn slash_then_space_is_task_text() {
        assert_eq!(
            Router::classify(" / 2024-12-31 18:30"),
            Intent::AddTask(" / 2024-12-31 18:30".to_string())
        );
        assert_eq!(Router::classify("/"), Intent::UnknownCommand("/".to_string()));
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(Router::classify("   "), Intent::Empty);
        assert_eq!(Router::classify(""), Intent::Empty);
    }

    #[test]
    fn free_text_is_add_task_verbatim() {
        assert_eq!(
            Router::classify("Buy milk / 2024-12-31 18:30"),
            Intent::AddTask("Buy milk / 2024-12-31 18:30".to_string())
        );
    }
}
