//! givtrack — charitable-donation contribution tracker client
//!
//! Drives the QR-resolution pipeline from the command line: resolve a typed
//! code to a contribution record, browse the full record list, or dump the
//! local seen-set. Stands in for the mobile presentation layer, which is an
//! external collaborator.

use anyhow::Result;
use clap::{Parser, Subcommand};
use givtrack_client::{BackendClient, LogNotifier, Session};
use givtrack_common::config::{Config, ConfigOverrides, MultiMatchPolicy};
use givtrack_common::db::{init_database, SeenSetStore, OPENED_IDS_KEY};
use givtrack_common::time::format_story_date;
use givtrack_common::ContributionRecord;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "givtrack", about = "Track how charitable contributions were used")]
struct Cli {
    /// Backend API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Folder for the local database
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Treat a code matching multiple records as an error instead of taking the first
    #[arg(long)]
    reject_multi: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a QR code to its contribution record
    Resolve { code: String },
    /// Fetch and list all contribution records
    List,
    /// Show which contribution ids have been opened on this installation
    Seen,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting givtrack v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let config = Config::resolve(ConfigOverrides {
        base_url: cli.base_url,
        data_dir: cli.data_dir,
        multi_match: cli.reject_multi.then_some(MultiMatchPolicy::Reject),
    })?;

    let pool = init_database(&config.database_path()).await?;
    let seen = SeenSetStore::new(pool);

    let client = BackendClient::new(&config.base_url, config.request_timeout_secs)?;
    let session = Session::new(client, config.multi_match, seen.clone(), Arc::new(LogNotifier));

    match cli.command {
        Command::Resolve { code } => {
            session.select_record(&code).await;
            let snapshot = session.snapshot().await;
            match snapshot.selected {
                Some(record) => print_record(&record, &config),
                None => println!("{}", snapshot.error.as_deref().unwrap_or("No Contribution.")),
            }
        }
        Command::List => {
            session.load_all().await;
            let snapshot = session.snapshot().await;
            if let Some(error) = snapshot.error {
                println!("Failed to fetch data: {}", error);
            } else if snapshot.records.is_empty() {
                println!("No contributions yet.");
            } else {
                for record in &snapshot.records {
                    println!(
                        "{}  {}  {}",
                        record.id,
                        record.charity_name,
                        record.qr_code.as_deref().unwrap_or("-")
                    );
                }
            }
        }
        Command::Seen => {
            let ids = seen.get(OPENED_IDS_KEY).await;
            if ids.is_empty() {
                println!("No contributions opened yet.");
            } else {
                for id in ids {
                    println!("{}", id);
                }
            }
        }
    }

    Ok(())
}

fn print_record(record: &ContributionRecord, config: &Config) {
    println!("{}", record.charity_name);
    println!("{}", record.description);
    if let Some(token) = &record.token {
        println!("YNT {}", token);
    }
    if let Some(location) = &record.location {
        println!("Location: {}", location);
    }
    if let Some(date) = &record.funds_receiving_date {
        println!("Funds received: {}", date);
    }
    match record.blockchain_link() {
        Some(link) => println!("View on blockchain: {}", link),
        None => println!("No blockchain link available."),
    }

    if record.story_is_empty() {
        println!("No Contribution.");
        return;
    }
    for entry in &record.child_story {
        println!();
        println!("{} ({})", entry.title, format_story_date(&entry.updated_at));
        println!("{}", entry.description);
        if let Some(path) = &entry.image_path {
            println!("Image: {}", config.image_url(path));
        }
        if let Some(path) = &entry.voice_path {
            println!("Voice: {}", config.image_url(path));
        }
    }
}
