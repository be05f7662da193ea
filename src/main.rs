//! HTB Rank - daily-cached Hack The Box ranking metrics
//!
//! Serves today's cached metrics record if one exists, otherwise fetches
//! fresh data from the Hack The Box API, caches it, and prints the JSON
//! payload to stdout.

use clap::Parser;

use htbrank::cache::FileStore;
use htbrank::cli::Cli;
use htbrank::config::{self, Credentials};
use htbrank::data::HtbClient;
use htbrank::snapshot::{self, SnapshotError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; deployed environments set vars directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "htbrank=info".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match config::table_name() {
        Err(err) => Err(SnapshotError::from(err)),
        Ok(table) => {
            let store = match &cli.store_dir {
                Some(root) => FileStore::open(root.clone(), &table),
                None => FileStore::new(&table).ok_or("could not determine a store directory")?,
            };
            let client = HtbClient::new(Credentials::from_env())?;
            let today = chrono::Utc::now().date_naive();

            snapshot::run_daily_snapshot(today, &store, &client).await
        }
    };

    let failed = result.is_err();
    let payload = snapshot::into_response(result);

    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", payload);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
