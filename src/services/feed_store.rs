//! Typed create/query operations over feed snapshots and their earthquakes.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde_json::Value;

use crate::entities::{feed_earthquakes, feed_snapshots, prelude::*};
use crate::error::FeedQueryError;
use crate::models::feed::FeedVariant;
use crate::services::archive::FileArchive;
use crate::services::usgs::{FeedMetadata, NormalizedEarthquake};

/// Most snapshots `GET /feed/list.json` will return
pub const FEED_LIST_LIMIT: u64 = 100;

/// Insert a new snapshot row. Metadata columns start out null.
pub async fn create_snapshot<C: ConnectionTrait>(
    db: &C,
    variant: FeedVariant,
    archived_at: DateTime<Utc>,
    content_path: Option<String>,
    response_status: Option<i32>,
) -> Result<feed_snapshots::Model, sea_orm::DbErr> {
    let snapshot = feed_snapshots::ActiveModel {
        archived_at: Set(archived_at.into()),
        kind: Set(variant.kind.as_str().to_string()),
        format: Set(variant.format.as_str().to_string()),
        timeframe: Set(variant.timeframe.as_str().to_string()),
        content_path: Set(content_path),
        response_status: Set(response_status),
        ..Default::default()
    };

    snapshot.insert(db).await
}

/// Copy the payload's metadata block onto an archived snapshot.
pub async fn record_metadata<C: ConnectionTrait>(
    db: &C,
    snapshot: feed_snapshots::Model,
    metadata: &FeedMetadata,
) -> Result<feed_snapshots::Model, sea_orm::DbErr> {
    let mut active_model: feed_snapshots::ActiveModel = snapshot.into();
    active_model.generated_at = Set(metadata.generated);
    active_model.source_url = Set(metadata.url.clone());
    active_model.title = Set(metadata.title.clone());
    active_model.api_version = Set(metadata.api.clone());
    active_model.event_count = Set(metadata.count);
    active_model.response_status = Set(metadata.status);

    active_model.update(db).await
}

pub async fn insert_earthquake<C: ConnectionTrait>(
    db: &C,
    feed_snapshot_id: i32,
    quake: &NormalizedEarthquake,
) -> Result<feed_earthquakes::Model, sea_orm::DbErr> {
    let record = feed_earthquakes::ActiveModel {
        feed_snapshot_id: Set(feed_snapshot_id),
        usgs_id: Set(quake.usgs_id.clone()),
        net: Set(quake.net.clone()),
        sources: Set(quake.sources.clone()),
        code: Set(quake.code.clone()),
        ids: Set(quake.ids.clone()),
        title: Set(quake.title.clone()),
        event_type: Set(quake.event_type.clone()),
        mag: Set(quake.mag),
        mag_type: Set(quake.mag_type.clone()),
        mmi: Set(quake.mmi),
        felt: Set(quake.felt),
        cdi: Set(quake.cdi),
        tsunami: Set(quake.tsunami),
        sig: Set(quake.sig),
        alert: Set(quake.alert.clone()),
        place: Set(quake.place.clone()),
        longitude: Set(quake.longitude),
        latitude: Set(quake.latitude),
        epicenter: Set(quake.epicenter_ewkt()),
        depth_km: Set(quake.depth_km),
        occurred_at: Set(quake.occurred_at),
        timezone_offset_minutes: Set(quake.timezone_offset_minutes),
        url: Set(quake.url.clone()),
        detail: Set(quake.detail.clone()),
        updated_at: Set(quake.updated_at),
        nst: Set(quake.nst),
        dmin: Set(quake.dmin),
        gap: Set(quake.gap),
        rms: Set(quake.rms),
        status: Set(quake.status.clone()),
        types: Set(quake.types.clone()),
        ..Default::default()
    };

    record.insert(db).await
}

/// Newest snapshot that has archived content.
pub async fn latest_archived<C: ConnectionTrait>(
    db: &C,
) -> Result<Option<feed_snapshots::Model>, sea_orm::DbErr> {
    FeedSnapshots::find()
        .filter(feed_snapshots::Column::ContentPath.is_not_null())
        .order_by(feed_snapshots::Column::ArchivedAt, Order::Desc)
        .order_by(feed_snapshots::Column::Id, Order::Desc)
        .one(db)
        .await
}

/// Up to `limit` snapshots, newest first.
pub async fn list_recent<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<feed_snapshots::Model>, sea_orm::DbErr> {
    FeedSnapshots::find()
        .order_by(feed_snapshots::Column::ArchivedAt, Order::Desc)
        .order_by(feed_snapshots::Column::Id, Order::Desc)
        .limit(limit)
        .all(db)
        .await
}

/// Earthquakes extracted from one snapshot, most recent quake first.
pub async fn earthquakes_for_snapshot<C: ConnectionTrait>(
    db: &C,
    feed_snapshot_id: i32,
) -> Result<Vec<feed_earthquakes::Model>, sea_orm::DbErr> {
    FeedEarthquakes::find()
        .filter(feed_earthquakes::Column::FeedSnapshotId.eq(feed_snapshot_id))
        .order_by(feed_earthquakes::Column::OccurredAt, Order::Desc)
        .all(db)
        .await
}

/// Raw content of the newest archived snapshot, decoded as JSON.
pub async fn latest_snapshot_raw<C: ConnectionTrait>(
    db: &C,
    archive: &FileArchive,
) -> Result<Value, FeedQueryError> {
    let snapshot = latest_archived(db).await?.ok_or(FeedQueryError::NotFound)?;
    let content_path = snapshot.content_path.ok_or(FeedQueryError::NotFound)?;

    let content = archive.load(&content_path).await?;
    Ok(serde_json::from_slice(&content)?)
}
