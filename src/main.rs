use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use taskbot::banner::{BannerInfo, print_banner, print_goodbye, render_keyboard};
use taskbot::consts::{DEFAULT_OWNER_ID, default_db_path};
use taskbot::logging::{LogFormat, init_logging, parse_level};
use taskbot::router::{InboundMessage, Reply, Router};
use taskbot::store::sqlite::SqliteTaskStore;
use taskbot::task::Period;

#[derive(Parser)]
#[command(name = "taskbot", version, about = "A personal task tracker driven by chat messages.")]
struct Cli {
    /// SQLite database path (use :memory: for ephemeral). Defaults to ~/.taskbot/tasks.db
    #[arg(short, long, env = "TASKBOT_DB")]
    db: Option<String>,

    /// Chat user id the messages are sent as
    #[arg(short, long, env = "TASKBOT_USER", default_value_t = DEFAULT_OWNER_ID)]
    user: i64,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, env = "TASKBOT_LOG", default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Handle a single message and exit (non-interactive)
    #[arg(short, long, conflicts_with = "list")]
    run: Option<String>,

    /// Print tasks for a period (all, today, tomorrow) and exit
    #[arg(short, long)]
    list: Option<Period>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = parse_level(&cli.log_level)
        .with_context(|| format!("unknown log level: {}", cli.log_level))?;
    init_logging(level, cli.log_format);

    let db = match cli.db {
        Some(db) => db,
        None => {
            let path = default_db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            path_str(&path)?.to_string()
        }
    };

    let store = SqliteTaskStore::open(&db)
        .with_context(|| format!("failed to open task database {db}"))?;
    let router = Router::new(Arc::new(store));
    info!(db = %db, owner_id = cli.user, "taskbot ready");

    // Single message mode
    if let Some(period) = cli.list {
        let reply = router
            .handle(&InboundMessage::new(cli.user, format!("/{period}")))
            .await;
        print_reply(&reply);
        return Ok(());
    }
    if let Some(text) = cli.run {
        let reply = router.handle(&InboundMessage::new(cli.user, text)).await;
        print_reply(&reply);
        return Ok(());
    }

    let database: &str = if db == ":memory:" { "ephemeral" } else { &db };
    print_banner(&BannerInfo {
        owner_id: cli.user,
        database,
    });
    print!("{}", render_keyboard());

    // REPL: one line is one inbound chat message
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        if matches!(line.trim(), "/quit" | "/exit" | "quit" | "exit") {
            break;
        }

        let reply = router.handle(&InboundMessage::new(cli.user, line)).await;
        print_reply(&reply);
    }

    print_goodbye();
    Ok(())
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.text.trim_end());
    if reply.show_menu {
        print!("\n{}", render_keyboard());
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("database path is not valid UTF-8: {}", path.display()))
}
