//! SeaORM Entity for feed_snapshots table
//!
//! One row per poll of the upstream ANSS feed. The raw response body lives in
//! the blob archive at `content_path`; the metadata columns stay null until
//! that body has been archived and parsed.

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::time_utils::parse_unix_millis;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "feed_snapshots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// When the poll was performed (our clock, not upstream's)
    pub archived_at: DateTimeWithTimeZone,
    pub kind: String,
    pub format: String,
    pub timeframe: String,
    /// Archive-relative path of the raw response body
    pub content_path: Option<String>,
    /// Upstream `metadata.generated`, milliseconds since the epoch
    pub generated_at: Option<i64>,
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub api_version: Option<String>,
    pub event_count: Option<i32>,
    pub response_status: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::feed_earthquakes::Entity")]
    FeedEarthquakes,
}

impl Related<super::feed_earthquakes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeedEarthquakes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Upstream generation time as a UTC instant.
    pub fn generated_datetime(&self) -> Option<DateTime<Utc>> {
        parse_unix_millis(self.generated_at)
    }

    /// How far the archive trails the moment upstream generated the feed.
    pub fn lag(&self) -> Option<Duration> {
        let generated = self.generated_datetime()?;
        Some(self.archived_at.with_timezone(&Utc) - generated)
    }

    /// True once content is archived and at least one metadata field was
    /// copied in. Every metadata key is optional upstream, so no single
    /// column marks the step as done.
    pub fn is_complete(&self) -> bool {
        self.content_path.is_some() && self.has_metadata()
    }

    fn has_metadata(&self) -> bool {
        self.generated_at.is_some()
            || self.source_url.is_some()
            || self.title.is_some()
            || self.api_version.is_some()
            || self.event_count.is_some()
            || self.response_status.is_some()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.title.as_deref().unwrap_or(""),
            self.archived_at.to_rfc3339()
        )
    }
}
