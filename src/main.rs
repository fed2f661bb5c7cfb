use anss_archive::{
    app,
    config::AppConfig,
    jobs::anss_feed_sync::start_anss_feed_sync_job,
    services::{archive::FileArchive, usgs::UsgsFeedClient},
    telemetry, AppState,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    telemetry::init_tracing();

    let config = AppConfig::from_env()?;

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    let archive = FileArchive::new(config.archive_dir.clone());
    tracing::info!(root = %archive.root().display(), "Using feed archive");

    match config.poll_interval {
        Some(every) => {
            tracing::info!("Polling ANSS feed every {}s", every.as_secs());
            let usgs = UsgsFeedClient::new(config.feed_url.clone());
            start_anss_feed_sync_job(db.clone(), archive.clone(), usgs, every).await;
        }
        None => {
            tracing::info!("FEED_POLL_INTERVAL_SECS not set, feed polling left to an external scheduler");
        }
    }

    let state = AppState { db, archive };

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
