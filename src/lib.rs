// src/lib.rs

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use services::archive::FileArchive;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub archive: FileArchive,
}

pub mod entities {
    pub mod prelude;
    pub mod feed_earthquakes;
    pub mod feed_snapshots;
}

pub mod services {
    pub mod archive;
    pub mod feed_store;
    pub mod time_utils;
    pub mod usgs;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod telemetry;

/// Router for the read-only feed API.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/feed/latest.json", get(handlers::feed::get_latest_feed))
        .route("/feed/list.json", get(handlers::feed::list_feeds))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
