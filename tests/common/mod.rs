use anss_archive::services::usgs::UsgsFeedClient;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FEED_PATH: &str = "/earthquakes/feed/v1.0/summary/1.0_hour.geojson";

/// Set up an in-memory SQLite database with all migrations applied.
/// A single pooled connection keeps the in-memory database alive.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// A well-formed feature as it appears in the USGS summary feed.
pub fn feature(usgs_id: &str, place: &str, time: i64) -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "mag": 1.4,
            "place": place,
            "time": time,
            "updated": time + 60_000,
            "tz": null,
            "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{usgs_id}"),
            "detail": format!("https://earthquake.usgs.gov/earthquakes/feed/v1.0/detail/{usgs_id}.geojson"),
            "felt": null,
            "cdi": null,
            "mmi": null,
            "alert": null,
            "status": "automatic",
            "tsunami": 0,
            "sig": 30,
            "net": "ci",
            "code": usgs_id.trim_start_matches("ci"),
            "ids": format!(",{usgs_id},"),
            "sources": ",ci,",
            "types": ",nearby-cities,origin,phase-data,",
            "nst": 22,
            "dmin": 0.08,
            "rms": 0.21,
            "gap": 64.0,
            "magType": "ml",
            "type": "earthquake",
            "title": format!("M 1.4 - {}", place.trim())
        },
        "geometry": {
            "type": "Point",
            "coordinates": [-116.7776667, 33.6633333, 13.62]
        },
        "id": usgs_id
    })
}

pub fn feed_payload(features: Vec<Value>, count: i64) -> Value {
    json!({
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1_700_000_400_000_i64,
            "url": "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/1.0_hour.geojson",
            "title": "USGS Magnitude 1.0+ Earthquakes, Past Hour",
            "status": 200,
            "api": "1.10.3",
            "count": count
        },
        "features": features,
        "bbox": [-117.0, 33.0, 1.0, -116.0, 34.0, 14.0]
    })
}

/// Serve `body` with `status` at the feed path.
pub async fn mock_feed(status: u16, body: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    server
}

pub fn feed_client(server: &MockServer) -> UsgsFeedClient {
    UsgsFeedClient::new(format!("{}{}", server.uri(), FEED_PATH))
}
