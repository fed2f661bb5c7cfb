// src/bin/get_latest_anss_feed.rs
//
// Archive the latest real-time earthquake notifications from the USGS's
// Advanced National Seismic System. Meant to be run from cron.
//
// Usage: cargo run --bin get_latest_anss_feed

use anss_archive::{
    config::AppConfig,
    jobs::anss_feed_sync::archive_latest_feed,
    services::{archive::FileArchive, usgs::UsgsFeedClient},
    telemetry,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    telemetry::init_tracing();

    let config = AppConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;

    let archive = FileArchive::new(config.archive_dir.clone());
    let usgs = UsgsFeedClient::new(config.feed_url.clone());

    let report = archive_latest_feed(&db, &archive, &usgs).await?;

    println!(
        "Archived feed #{}: {} earthquakes saved, {} skipped",
        report.snapshot.id,
        report.events.len(),
        report.malformed.len()
    );

    Ok(())
}
