//! Read-only JSON endpoints over the feed archive.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::info;

use crate::error::FeedQueryError;
use crate::models::feed::FeedSnapshotSummary;
use crate::services::feed_store::{self, FEED_LIST_LIMIT};
use crate::AppState;

/// Pretty JSON with four-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

fn json_response(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// GET /feed/latest.json
///
/// The most recently archived raw feed, re-indented.
///
/// # Response
/// - 200: the archived GeoJSON document
/// - 404: nothing has been archived yet
/// - 500: database or archive error
pub async fn get_latest_feed(State(state): State<AppState>) -> Result<Response, FeedQueryError> {
    let content = feed_store::latest_snapshot_raw(&state.db, &state.archive).await?;
    let body = to_pretty_json(&content)?;

    Ok(json_response(body))
}

/// GET /feed/list.json
///
/// Metadata for the most recent archived feeds, newest first.
pub async fn list_feeds(State(state): State<AppState>) -> Result<Response, FeedQueryError> {
    let snapshots = feed_store::list_recent(&state.db, FEED_LIST_LIMIT).await?;

    info!(count = snapshots.len(), "Feed list query completed");

    let summaries: Vec<FeedSnapshotSummary> =
        snapshots.into_iter().map(FeedSnapshotSummary::from).collect();
    let body = to_pretty_json(&summaries)?;

    Ok(json_response(body))
}
