//! Startup banner and menu display for the terminal transport.

use crate::menu;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub owner_id: i64,
    pub database: &'a str,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║            T A S K B O T              ║
   ║      one line in, one task out        ║
   ╚═══════════════════════════════════════╝

   version   {}
   user      {}
   database  {}
"#,
        env!("CARGO_PKG_VERSION"),
        info.owner_id,
        info.database,
    );
    println!("   type /help for commands, /quit to exit\n");
}

/// Render the menu keyboard as bracketed buttons, one row per line.
pub fn render_keyboard() -> String {
    let mut out = String::new();
    for row in menu::keyboard() {
        let buttons: Vec<String> = row.iter().map(|label| format!("[ {label} ]")).collect();
        out.push_str("   ");
        out.push_str(&buttons.join("  "));
        out.push('\n');
    }
    out
}

pub fn print_goodbye() {
    println!("goodbye.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_banner_does_not_panic() {
        print_banner(&BannerInfo {
            owner_id: 1,
            database: "ephemeral",
        });
    }

    #[test]
    fn keyboard_has_three_rows() {
        let rendered = render_keyboard();
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("[ 📋 All tasks ]"));
    }
}
