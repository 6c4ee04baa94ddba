//! The fixed command vocabulary: slash commands and keyboard labels.
//!
//! Every entry has a `/name`, an optional keyboard label a chat client sends
//! verbatim when its button is pressed, and optional aliases. [`lookup`]
//! resolves any of them to a [`MenuAction`]; [`help_text`] is generated from
//! the same table.

/// What a menu trigger asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Help,
    AddPrompt,
    ListAll,
    ListToday,
    ListTomorrow,
    ListCompleted,
}

/// A menu command definition.
pub struct MenuEntry {
    pub action: MenuAction,
    pub name: &'static str,
    pub label: Option<&'static str>,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub const MENU: &[MenuEntry] = &[
    MenuEntry {
        action: MenuAction::Start,
        name: "/start",
        label: None,
        aliases: &[],
        description: "greeting and main menu",
    },
    MenuEntry {
        action: MenuAction::Help,
        name: "/help",
        label: None,
        aliases: &["/h", "/?"],
        description: "show this help",
    },
    MenuEntry {
        action: MenuAction::AddPrompt,
        name: "/add",
        label: Some("📝 Add task"),
        aliases: &[],
        description: "how to add a task",
    },
    MenuEntry {
        action: MenuAction::ListAll,
        name: "/all",
        label: Some("📋 All tasks"),
        aliases: &["/list"],
        description: "list all tasks",
    },
    MenuEntry {
        action: MenuAction::ListToday,
        name: "/today",
        label: Some("📅 Today"),
        aliases: &[],
        description: "list tasks due today",
    },
    MenuEntry {
        action: MenuAction::ListTomorrow,
        name: "/tomorrow",
        label: Some("🚀 Tomorrow"),
        aliases: &[],
        description: "list tasks due tomorrow",
    },
    MenuEntry {
        action: MenuAction::ListCompleted,
        name: "/completed",
        label: Some("✅ Completed"),
        aliases: &[],
        description: "list completed tasks",
    },
];

/// Resolve a trimmed message to a menu action, if it is a trigger.
pub fn lookup(input: &str) -> Option<MenuAction> {
    let input = input.trim();
    MENU.iter()
        .find(|e| input == e.name || e.label == Some(input) || e.aliases.contains(&input))
        .map(|e| e.action)
}

/// Keyboard button rows, in the order a chat client should lay them out.
pub fn keyboard() -> Vec<Vec<&'static str>> {
    let label = |action: MenuAction| {
        MENU.iter()
            .find(|e| e.action == action)
            .and_then(|e| e.label)
            .unwrap_or_default()
    };
    vec![
        vec![label(MenuAction::AddPrompt)],
        vec![label(MenuAction::ListAll), label(MenuAction::ListToday)],
        vec![label(MenuAction::ListTomorrow), label(MenuAction::ListCompleted)],
    ]
}

/// Generate help text from the menu table plus the per-task commands.
pub fn help_text() -> String {
    let mut entries: Vec<(String, &str)> = MENU
        .iter()
        .map(|e| (format_label(e.name, e.aliases), e.description))
        .collect();
    entries.push(("/done<id>".to_string(), "mark a task as done"));
    entries.push(("/del<id>".to_string(), "delete a task"));

    let max_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(10);

    let mut out = String::new();
    for (label, desc) in &entries {
        out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
    }
    out.push_str("\nAny other message becomes a task: Task / YYYY-MM-DD HH:MM (date optional)\n");
    out
}

/// All names, labels and aliases (for duplicate detection).
pub fn all_triggers() -> Vec<&'static str> {
    let mut triggers = Vec::new();
    for entry in MENU {
        triggers.push(entry.name);
        triggers.extend(entry.label);
        triggers.extend_from_slice(entry.aliases);
    }
    triggers
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve() {
        assert_eq!(lookup("/start"), Some(MenuAction::Start));
        assert_eq!(lookup("/today"), Some(MenuAction::ListToday));
        assert_eq!(lookup("/completed"), Some(MenuAction::ListCompleted));
    }

    #[test]
    fn labels_resolve() {
        assert_eq!(lookup("📋 All tasks"), Some(MenuAction::ListAll));
        assert_eq!(lookup("🚀 Tomorrow"), Some(MenuAction::ListTomorrow));
        assert_eq!(lookup("📝 Add task"), Some(MenuAction::AddPrompt));
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(lookup("/h"), Some(MenuAction::Help));
        assert_eq!(lookup("/?"), Some(MenuAction::Help));
        assert_eq!(lookup("/list"), Some(MenuAction::ListAll));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(lookup("  /all \n"), Some(MenuAction::ListAll));
    }

    #[test]
    fn task_commands_are_not_menu_entries() {
        assert_eq!(lookup("/done"), None);
        assert_eq!(lookup("/done1"), None);
        assert_eq!(lookup("/del"), None);
        assert_eq!(lookup("buy milk"), None);
    }

    #[test]
    fn no_duplicate_triggers() {
        let triggers = all_triggers();
        let mut seen = Vec::new();
        for t in &triggers {
            assert!(!seen.contains(t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands() {
        let text = help_text();
        for entry in MENU {
            assert!(text.contains(entry.name), "help missing: {}", entry.name);
        }
        assert!(text.contains("/done<id>"));
        assert!(text.contains("/del<id>"));
    }

    #[test]
    fn keyboard_holds_every_label() {
        let buttons: Vec<_> = keyboard().into_iter().flatten().collect();
        let labels: Vec<_> = MENU.iter().filter_map(|e| e.label).collect();
        assert_eq!(buttons.len(), labels.len());
        for label in labels {
            assert!(buttons.contains(&label), "keyboard missing: {label}");
        }
    }

    #[test]
    fn format_label_with_aliases() {
        assert_eq!(format_label("/help", &["/h", "/?"]), "/help (/h, /?)");
        assert_eq!(format_label("/all", &[]), "/all");
    }
}
