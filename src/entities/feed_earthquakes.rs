//! SeaORM Entity for feed_earthquakes table
//!
//! Table includes every quake in every archived feed. Lots of duplicates.

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::time_utils::parse_unix_millis;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feed_earthquakes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub feed_snapshot_id: i32,

    // Identifiers
    /// Composite id combining the source network and the event code
    pub usgs_id: String,
    pub net: String,
    /// Comma-separated list of contributing networks
    pub sources: String,
    pub code: String,
    /// Comma-separated list of associated event ids
    pub ids: String,
    pub title: String,

    // What
    pub event_type: String,
    pub mag: Option<f64>,
    pub mag_type: String,
    /// Maximum Modified Mercalli Intensity (ShakeMap)
    pub mmi: Option<f64>,
    pub felt: Option<i32>,
    /// Community decimal intensity (DYFI)
    pub cdi: Option<f64>,
    pub tsunami: Option<i32>,
    pub sig: Option<i32>,
    /// PAGER alert level
    pub alert: String,

    // Where
    pub place: String,
    pub longitude: f64,
    pub latitude: f64,
    /// `SRID=4326;POINT(lon lat)`
    pub epicenter: String,
    pub depth_km: Option<f64>,

    // When
    /// Milliseconds since the epoch
    pub occurred_at: Option<i64>,
    pub timezone_offset_minutes: Option<i32>,

    // References
    pub url: String,
    pub detail: String,

    // Review
    /// Milliseconds since the epoch
    pub updated_at: Option<i64>,
    pub nst: Option<i32>,
    pub dmin: Option<f64>,
    pub gap: Option<f64>,
    pub rms: Option<f64>,
    pub status: String,
    pub types: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::feed_snapshots::Entity",
        from = "Column::FeedSnapshotId",
        to = "super::feed_snapshots::Column::Id",
        on_delete = "Cascade"
    )]
    FeedSnapshot,
}

impl Related<super::feed_snapshots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedSnapshot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn occurred_datetime(&self) -> Option<DateTime<Utc>> {
        parse_unix_millis(self.occurred_at)
    }

    pub fn updated_datetime(&self) -> Option<DateTime<Utc>> {
        parse_unix_millis(self.updated_at)
    }

    /// Whether the quake happened within the hour before `now`.
    pub fn is_last_hour(&self, now: DateTime<Utc>) -> bool {
        self.occurred_datetime()
            .is_some_and(|occurred| occurred >= now - Duration::hours(1))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
