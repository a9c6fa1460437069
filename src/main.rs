use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use feedping::cli::{Cli, Commands};
use feedping::config::Config;
use feedping::domain::Notification;
use feedping::services::{NotificationService, Notifier, SubscriberService, SyncService};
use feedping::sources::RssAtomSource;
use feedping::storage::{FileStore, StateStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Open (or initialize) the durable state store
    let store = Arc::new(FileStore::open(&config.state_path)?);

    match cli.command {
        Commands::Subscribe { chat_id } => cmd_subscribe(store, chat_id),
        Commands::Unsubscribe { chat_id } => cmd_unsubscribe(store, chat_id),
        Commands::Subscribers => cmd_subscribers(store),
        Commands::Run { dry_run } => cmd_run(store, &config, dry_run),
        Commands::Watch { interval } => cmd_watch(store, &config, interval),
    }
}

fn cmd_subscribe(store: Arc<FileStore>, chat_id: i64) -> anyhow::Result<()> {
    let service = SubscriberService::new(store);

    if service.subscribe(chat_id)? {
        println!("Subscribed chat {}.", chat_id);
    } else {
        println!("Chat {} is already subscribed.", chat_id);
    }

    Ok(())
}

fn cmd_unsubscribe(store: Arc<FileStore>, chat_id: i64) -> anyhow::Result<()> {
    let service = SubscriberService::new(store);

    if service.unsubscribe(chat_id)? {
        println!("Unsubscribed chat {}.", chat_id);
    } else {
        println!("Chat {} is not subscribed.", chat_id);
    }

    Ok(())
}

fn cmd_subscribers(store: Arc<FileStore>) -> anyhow::Result<()> {
    let service = SubscriberService::new(store);
    let subscribers = service.list();

    if subscribers.is_empty() {
        println!("No subscribers.");
        return Ok(());
    }

    println!("Subscribed chats:\n");
    for chat_id in subscribers {
        println!("  {}", chat_id);
    }

    Ok(())
}

fn cmd_run(store: Arc<FileStore>, config: &Config, dry_run: bool) -> anyhow::Result<()> {
    if config.feeds.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    let sync = SyncService::new(store.clone(), RssAtomSource::new());

    println!("Fetching feeds...\n");
    let results = sync.sync_all(&config.feeds);

    if results.is_empty() {
        println!("No new entries.");
        return Ok(());
    }

    let notifier = if !dry_run {
        Some(NotificationService::new(config)?)
    } else {
        None
    };
    let subscribers = store.subscribers();

    let mut total_sent = 0;

    for (feed, entries) in &results {
        println!("{} ({} new entries):", feed, entries.len());

        for entry in entries {
            let notification = Notification::from_entry(entry);

            if dry_run {
                println!("  [DRY RUN] {}", notification.format());
                continue;
            }

            for &chat_id in &subscribers {
                match notifier.as_ref().unwrap().deliver(chat_id, entry) {
                    Ok(()) => total_sent += 1,
                    Err(e) => {
                        tracing::warn!(chat = chat_id, error = %e, "notification failed");
                    }
                }
            }
        }

        println!();
    }

    if dry_run {
        println!(
            "Dry run complete. Would notify {} entries.",
            results.iter().map(|(_, e)| e.len()).sum::<usize>()
        );
    } else {
        println!("Sent {} notifications.", total_sent);
    }

    Ok(())
}

fn cmd_watch(store: Arc<FileStore>, config: &Config, interval: Option<u64>) -> anyhow::Result<()> {
    let interval = Duration::from_secs(interval.unwrap_or(config.poll_interval_secs));

    tracing::info!(every_secs = interval.as_secs(), feeds = config.feeds.len(), "watching feeds");

    loop {
        cmd_run(store.clone(), config, false)?;
        thread::sleep(interval);
    }
}
