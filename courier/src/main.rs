//! Courier: idempotent mail fan-out relay.

mod config;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use courier_common::{EventId, StorageLocator, TriggerEvent};
use courier_notify::{AlertSink, LogAlertSink, Notification, format_alert};
use courier_relay::{FanOutRelay, FileLedger, FileSink, Response};
use courier_store::FileBlobStore;
use tracing::warn;

use crate::config::CourierConfig;

#[derive(Debug, Parser)]
#[command(name = "courier", version, about = "Idempotent mail fan-out relay")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "courier.ron")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Relay one stored message to its primary and blind-copy recipients
    Relay {
        /// Container the object lives in
        #[arg(long)]
        container: String,
        /// Object key within the container
        #[arg(long)]
        key: String,
        /// Stable event identity (e.g. the upload's etag), NOT the key
        #[arg(long)]
        event_id: String,
    },
    /// Format a delivery-failure notification payload into an alert
    Notify {
        /// Path to the notification JSON document
        #[arg(long)]
        file: PathBuf,
    },
    /// Purge expired dedup ledger records
    Sweep,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    courier_common::logging::init();

    let cli = Cli::parse();
    let config = CourierConfig::load(&cli.config)?;

    match cli.command {
        Command::Relay {
            container,
            key,
            event_id,
        } => relay(&config, container, key, event_id).await,
        Command::Notify { file } => notify(&file).await,
        Command::Sweep => sweep(&config).await,
    }
}

async fn relay(
    config: &CourierConfig,
    container: String,
    key: String,
    event_id: String,
) -> anyhow::Result<()> {
    let store = Arc::new(FileBlobStore::new(&config.store_root));
    let sink = Arc::new(FileSink::open(&config.outbound).await?);
    let ledger = Arc::new(FileLedger::open(&config.ledger).await?);

    let relay = FanOutRelay::new(config.relay(), store, sink, ledger)?;
    let event = TriggerEvent::new(
        StorageLocator::new(container, key),
        EventId::new(event_id),
    );

    match relay.relay(&event).await {
        Ok(outcome) => {
            println!("{}", Response::from(&outcome).body);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", Response::from_error(&e).body);
            Err(e.into())
        }
    }
}

async fn notify(file: &Path) -> anyhow::Result<()> {
    let payload = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Unable to read notification file {}", file.display()))?;

    let notification = Notification::parse(&payload)?;
    match format_alert(&notification) {
        Some(alert) => LogAlertSink::new().publish(&alert).await?,
        None => warn!(file = %file.display(), "Notification did not produce an alert"),
    }

    Ok(())
}

async fn sweep(config: &CourierConfig) -> anyhow::Result<()> {
    let ledger = FileLedger::open(&config.ledger).await?;
    let purged = ledger.sweep().await?;
    println!("Purged {purged} expired ledger record(s)");
    Ok(())
}
