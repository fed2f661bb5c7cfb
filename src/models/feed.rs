use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::feed_snapshots;

/// Which upstream feed variant was polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedKind {
    #[serde(rename = "magnitude-over-1")]
    MagnitudeOver1,
}

impl FeedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::MagnitudeOver1 => "magnitude-over-1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedFormat {
    #[serde(rename = "geojson")]
    GeoJson,
}

impl FeedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedFormat::GeoJson => "geojson",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedTimeframe {
    #[serde(rename = "one-hour")]
    OneHour,
}

impl FeedTimeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedTimeframe::OneHour => "one-hour",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FeedTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind/format/timeframe triple a snapshot is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedVariant {
    pub kind: FeedKind,
    pub format: FeedFormat,
    pub timeframe: FeedTimeframe,
}

impl FeedVariant {
    /// The only variant archived today: M1.0+ quakes over the past hour, as GeoJSON.
    pub const HOURLY_M1_GEOJSON: FeedVariant = FeedVariant {
        kind: FeedKind::MagnitudeOver1,
        format: FeedFormat::GeoJson,
        timeframe: FeedTimeframe::OneHour,
    };

    /// Archive path for a poll made at `archived_at`:
    /// `anss/{kind}/{format}/{timeframe}/{archived_at}.json`
    pub fn content_path(&self, archived_at: DateTime<Utc>) -> String {
        format!(
            "anss/{}/{}/{}/{}.json",
            self.kind,
            self.format,
            self.timeframe,
            archived_at.format("%Y-%m-%dT%H%M%S%.6fZ")
        )
    }
}

/// One entry of `GET /feed/list.json`. Never carries the archived payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshotSummary {
    pub id: i32,
    pub archived_at: DateTime<FixedOffset>,
    pub kind: String,
    pub format: String,
    pub timeframe: String,
    pub content_path: Option<String>,
    pub generated_at: Option<i64>,
    pub generated_datetime: Option<DateTime<Utc>>,
    pub lag_seconds: Option<i64>,
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub api_version: Option<String>,
    pub event_count: Option<i32>,
    pub response_status: Option<i32>,
}

impl From<feed_snapshots::Model> for FeedSnapshotSummary {
    fn from(snapshot: feed_snapshots::Model) -> Self {
        let generated_datetime = snapshot.generated_datetime();
        let lag_seconds = snapshot.lag().map(|lag| lag.num_seconds());

        Self {
            id: snapshot.id,
            archived_at: snapshot.archived_at,
            kind: snapshot.kind,
            format: snapshot.format,
            timeframe: snapshot.timeframe,
            content_path: snapshot.content_path,
            generated_at: snapshot.generated_at,
            generated_datetime,
            lag_seconds,
            source_url: snapshot.source_url,
            title: snapshot.title,
            api_version: snapshot.api_version,
            event_count: snapshot.event_count,
            response_status: snapshot.response_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
