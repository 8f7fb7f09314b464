#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the earthquake ingestion tool.
//!
//! Meant to be invoked by an external scheduler (cron or similar); one
//! invocation runs one ingestion cycle.

use clap::{Parser, Subcommand};
use quake_map_database::{db, queries};
use quake_map_feed::FeedFetcher;
use quake_map_geocoder::google::GoogleGeocoder;
use quake_map_ingest::sync;

#[derive(Parser)]
#[command(name = "quake_map_ingest", about = "Earthquake feed ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed and ingest every record newer than the stored cutoff
    Sync,
    /// Open the database and apply the schema, nothing else
    Migrate,
    /// Print the current ingestion cutoff identifier
    Latest,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Migrate => {
            log::info!("Applying database schema...");
            db::connect_from_env()?;
            log::info!("Schema up to date.");
        }
        Commands::Latest => {
            let db = db::connect_from_env()?;
            match queries::latest_earthquake_id(&db)? {
                Some(id) => println!("{id}"),
                None => println!("(store is empty)"),
            }
        }
        Commands::Sync => {
            let api_key = std::env::var("GOOGLE_MAPS_API_KEY")
                .map_err(|_| "GOOGLE_MAPS_API_KEY is not set")?;

            let db = db::connect_from_env()?;
            let resolver = GoogleGeocoder::new(&api_key)?;
            let fetcher = FeedFetcher::from_env();

            let inserted = sync(&db, &fetcher, &resolver).await?;
            println!("Successfully loaded {inserted} earthquakes");
        }
    }

    Ok(())
}
