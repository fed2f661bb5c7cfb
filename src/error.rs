//! Error types for ingestion and the read API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::feed::ErrorResponse;

/// Failures that abort an ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Request for {url} failed with code {status}")]
    FetchFailed { status: u16, url: String },

    #[error("Malformed feed payload: {0}")]
    MalformedPayload(String),

    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A single feature that could not be decoded. Collected, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed feature #{index} ({}): {reason}", .usgs_id.as_deref().unwrap_or("no id"))]
pub struct MalformedFeature {
    pub index: usize,
    pub usgs_id: Option<String>,
    pub reason: String,
}

/// Failures of the read-side queries.
#[derive(Debug, Error)]
pub enum FeedQueryError {
    #[error("No archived feed found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Archive error: {0}")]
    Archive(#[from] std::io::Error),

    #[error("Archived feed is not valid JSON: {0}")]
    InvalidContent(#[from] serde_json::Error),
}

impl FeedQueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FeedQueryError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FeedQueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Feed query failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_message() {
        let err = IngestError::FetchFailed {
            status: 503,
            url: "https://example.com/feed.geojson".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Request for https://example.com/feed.geojson failed with code 503"
        );
    }

    #[test]
    fn test_malformed_feature_message() {
        let err = MalformedFeature {
            index: 2,
            usgs_id: None,
            reason: "missing field `properties`".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Malformed feature #2 (no id): missing field `properties`"
        );
    }

    #[test]
    fn test_query_error_status_codes() {
        assert_eq!(FeedQueryError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            FeedQueryError::Database(DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
