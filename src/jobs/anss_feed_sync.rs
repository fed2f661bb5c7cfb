//! Sync job that archives the latest real-time earthquake notifications
//! from the USGS Advanced National Seismic System.
//!
//! Each run polls the feed once, stores the untouched response body in the
//! blob archive, then writes one `feed_snapshots` row and one
//! `feed_earthquakes` row per feature.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio::time::{interval, Duration};

use crate::entities::{feed_earthquakes, feed_snapshots};
use crate::error::{IngestError, MalformedFeature};
use crate::models::feed::FeedVariant;
use crate::services::archive::FileArchive;
use crate::services::feed_store;
use crate::services::usgs::{self, UsgsFeedClient};

/// Outcome of a run that got as far as the feature list.
#[derive(Debug)]
pub struct IngestReport {
    pub snapshot: feed_snapshots::Model,
    pub events: Vec<feed_earthquakes::Model>,
    /// Features that were skipped; the rest of the run went ahead without them
    pub malformed: Vec<MalformedFeature>,
}

/// Start the periodic feed archive job
pub async fn start_anss_feed_sync_job(
    db: DatabaseConnection,
    archive: FileArchive,
    usgs: UsgsFeedClient,
    every: Duration,
) {
    tokio::spawn(async move {
        let mut interval = interval(every);

        loop {
            // First tick completes immediately, so the first poll happens on startup
            interval.tick().await;

            tracing::info!("Starting scheduled ANSS feed archive");
            match archive_latest_feed(&db, &archive, &usgs).await {
                Ok(report) => {
                    tracing::info!(
                        snapshot_id = report.snapshot.id,
                        events = report.events.len(),
                        malformed = report.malformed.len(),
                        "Scheduled ANSS feed archive complete"
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to archive ANSS feed: {}", e);
                }
            }
        }
    });
}

/// Fetch, archive and normalize one poll of the feed.
pub async fn archive_latest_feed(
    db: &DatabaseConnection,
    archive: &FileArchive,
    usgs: &UsgsFeedClient,
) -> Result<IngestReport, IngestError> {
    let variant = FeedVariant::HOURLY_M1_GEOJSON;

    let response = usgs.fetch_feed().await?;
    let archived_at = Utc::now();

    if !response.is_ok() {
        let snapshot = feed_store::create_snapshot(
            db,
            variant,
            archived_at,
            None,
            Some(i32::from(response.status)),
        )
        .await?;

        let err = IngestError::FetchFailed {
            status: response.status,
            url: usgs.feed_url().to_string(),
        };
        tracing::error!(snapshot_id = snapshot.id, "{}", err);
        return Err(err);
    }

    // Raw content is committed before anything is read out of it
    tracing::debug!("Archiving data");
    let content_path = variant.content_path(archived_at);
    archive.save(&content_path, &response.body).await?;

    let snapshot =
        feed_store::create_snapshot(db, variant, archived_at, Some(content_path.clone()), None)
            .await?;
    tracing::debug!(snapshot_id = snapshot.id, path = %content_path, "Archived feed");

    let payload = usgs::parse_payload(&response.body).map_err(|e| {
        tracing::error!(snapshot_id = snapshot.id, error = %e, "Feed payload is malformed");
        IngestError::MalformedPayload(e.to_string())
    })?;

    tracing::debug!(metadata = ?payload.metadata, "Logging metadata");
    let snapshot = feed_store::record_metadata(db, snapshot, &payload.metadata).await?;

    if let Some(count) = payload.metadata.count {
        if usize::try_from(count).ok() != Some(payload.features.len()) {
            tracing::warn!(
                reported = count,
                actual = payload.features.len(),
                "Feed metadata count does not match feature list"
            );
        }
    }

    let mut events = Vec::with_capacity(payload.features.len());
    let mut malformed = Vec::new();

    for (index, raw) in payload.features.iter().enumerate() {
        match usgs::normalize_feature(index, raw) {
            Ok(quake) => {
                let record = feed_store::insert_earthquake(db, snapshot.id, &quake).await?;
                tracing::debug!("Saved {}", record);
                events.push(record);
            }
            Err(e) => {
                tracing::warn!("Skipping feature: {}", e);
                malformed.push(e);
            }
        }
    }

    tracing::info!(
        snapshot_id = snapshot.id,
        saved = events.len(),
        skipped = malformed.len(),
        "ANSS feed archive complete"
    );

    Ok(IngestReport {
        snapshot,
        events,
        malformed,
    })
}
