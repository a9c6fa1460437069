use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedping")]
#[command(about = "Feed watcher that pings chat subscribers about new entries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Subscribe a chat to new-entry notifications
    Subscribe {
        /// Chat identifier to add
        chat_id: i64,
    },

    /// Unsubscribe a chat
    Unsubscribe {
        /// Chat identifier to remove
        chat_id: i64,
    },

    /// List subscribed chats
    Subscribers,

    /// Fetch all feeds once and notify subscribers of new entries
    Run {
        /// Dry run - don't send notifications, just show what would be sent
        #[arg(long)]
        dry_run: bool,
    },

    /// Poll feeds forever at the configured interval
    Watch {
        /// Seconds between poll cycles (overrides FEEDPING_INTERVAL)
        #[arg(long)]
        interval: Option<u64>,
    },
}
