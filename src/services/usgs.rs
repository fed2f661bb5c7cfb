//! USGS real-time feed client and payload decoding.
//!
//! The GeoJSON summary feed is loosely typed, so every property is decoded as
//! optional. Free-text fields are trimmed and default to the empty string.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::MalformedFeature;

pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/1.0_hour.geojson";

/// Spatial reference of feed coordinates (WGS84)
pub const EPICENTER_SRID: i32 = 4326;

#[derive(Clone)]
pub struct UsgsFeedClient {
    client: Client,
    feed_url: String,
}

/// Status and untouched body of one upstream response.
#[derive(Debug, Clone)]
pub struct FeedResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FeedResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

impl UsgsFeedClient {
    pub fn new(feed_url: String) -> Self {
        Self {
            client: Client::new(),
            feed_url,
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// GET the feed. Non-success statuses are returned, not raised, so the
    /// caller can record them.
    pub async fn fetch_feed(&self) -> Result<FeedResponse, reqwest::Error> {
        tracing::debug!(url = %self.feed_url, "Requesting ANSS feed");

        let response = self
            .client
            .get(&self.feed_url)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!(status, "Response code");

        let body = response.bytes().await?.to_vec();

        Ok(FeedResponse { status, body })
    }
}

/// Top level of the GeoJSON document. Features stay raw so a single bad
/// feature can be skipped without losing the rest.
#[derive(Debug, Deserialize)]
pub struct FeedPayload {
    pub metadata: FeedMetadata,
    pub features: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedMetadata {
    pub generated: Option<i64>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub api: Option<String>,
    pub count: Option<i32>,
    pub status: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: Option<String>,
    properties: EventProperties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// `[longitude, latitude, depth]`
    coordinates: (f64, f64, Option<f64>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventProperties {
    mag: Option<f64>,
    place: Option<String>,
    time: Option<i64>,
    updated: Option<i64>,
    tz: Option<i32>,
    url: Option<String>,
    detail: Option<String>,
    felt: Option<i32>,
    cdi: Option<f64>,
    mmi: Option<f64>,
    alert: Option<String>,
    status: Option<String>,
    tsunami: Option<i32>,
    sig: Option<i32>,
    net: Option<String>,
    code: Option<String>,
    ids: Option<String>,
    sources: Option<String>,
    types: Option<String>,
    nst: Option<i32>,
    dmin: Option<f64>,
    rms: Option<f64>,
    gap: Option<f64>,
    mag_type: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    title: Option<String>,
}

/// One feature, normalized and ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEarthquake {
    pub usgs_id: String,
    pub net: String,
    pub sources: String,
    pub code: String,
    pub ids: String,
    pub title: String,
    pub event_type: String,
    pub mag: Option<f64>,
    pub mag_type: String,
    pub mmi: Option<f64>,
    pub felt: Option<i32>,
    pub cdi: Option<f64>,
    pub tsunami: Option<i32>,
    pub sig: Option<i32>,
    pub alert: String,
    pub place: String,
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: Option<f64>,
    pub occurred_at: Option<i64>,
    pub timezone_offset_minutes: Option<i32>,
    pub url: String,
    pub detail: String,
    pub updated_at: Option<i64>,
    pub nst: Option<i32>,
    pub dmin: Option<f64>,
    pub gap: Option<f64>,
    pub rms: Option<f64>,
    pub status: String,
    pub types: String,
}

impl NormalizedEarthquake {
    /// Epicenter as extended WKT.
    pub fn epicenter_ewkt(&self) -> String {
        format!(
            "SRID={};POINT({} {})",
            EPICENTER_SRID, self.longitude, self.latitude
        )
    }
}

/// Prepare a free-text value from the feed for the database.
pub fn clean_text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Parse the response body into metadata plus raw features.
pub fn parse_payload(body: &[u8]) -> Result<FeedPayload, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Decode the feature at `index` of the feed's feature list.
pub fn normalize_feature(index: usize, raw: &Value) -> Result<NormalizedEarthquake, MalformedFeature> {
    let feature = Feature::deserialize(raw).map_err(|e| MalformedFeature {
        index,
        usgs_id: raw.get("id").and_then(Value::as_str).map(str::to_string),
        reason: e.to_string(),
    })?;

    let p = feature.properties;
    let (longitude, latitude, depth_km) = feature.geometry.coordinates;

    Ok(NormalizedEarthquake {
        usgs_id: clean_text(feature.id),
        net: clean_text(p.net),
        sources: clean_text(p.sources),
        code: clean_text(p.code),
        ids: clean_text(p.ids),
        title: clean_text(p.title),
        event_type: clean_text(p.event_type),
        mag: p.mag,
        mag_type: clean_text(p.mag_type),
        mmi: p.mmi,
        felt: p.felt,
        cdi: p.cdi,
        tsunami: p.tsunami,
        sig: p.sig,
        alert: clean_text(p.alert),
        place: clean_text(p.place),
        longitude,
        latitude,
        depth_km,
        occurred_at: p.time,
        timezone_offset_minutes: p.tz,
        url: clean_text(p.url),
        detail: clean_text(p.detail),
        updated_at: p.updated,
        nst: p.nst,
        dmin: p.dmin,
        gap: p.gap,
        rms: p.rms,
        status: clean_text(p.status),
        types: clean_text(p.types),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_feature() -> Value {
        json!({
            "type": "Feature",
            "properties": {
                "mag": 1.73,
                "place": " 10km NW of Town ",
                "time": 1_700_000_000_000_i64,
                "updated": 1_700_000_100_000_i64,
                "tz": null,
                "url": "https://earthquake.usgs.gov/earthquakes/eventpage/ci40567",
                "detail": "https://earthquake.usgs.gov/earthquakes/feed/v1.0/detail/ci40567.geojson",
                "felt": null,
                "cdi": null,
                "mmi": null,
                "alert": null,
                "status": "automatic",
                "tsunami": 0,
                "sig": 46,
                "net": "ci",
                "code": "40567",
                "ids": ",ci40567,",
                "sources": ",ci,",
                "types": ",nearby-cities,origin,phase-data,",
                "nst": 31,
                "dmin": 0.0526,
                "rms": 0.19,
                "gap": 57.0,
                "magType": "ml",
                "type": "earthquake",
                "title": "M 1.7 - 10km NW of Town"
            },
            "geometry": {
                "type": "Point",
                "coordinates": [-117.4951667, 33.9121667, 7.52]
            },
            "id": "ci40567"
        })
    }

    #[test]
    fn test_normalize_feature() {
        let quake = normalize_feature(0, &sample_feature()).unwrap();

        assert_eq!(quake.usgs_id, "ci40567");
        assert_eq!(quake.place, "10km NW of Town");
        assert_eq!(quake.alert, "");
        assert_eq!(quake.mag, Some(1.73));
        assert_eq!(quake.mag_type, "ml");
        assert_eq!(quake.event_type, "earthquake");
        assert_eq!(quake.felt, None);
        assert_eq!(quake.sig, Some(46));
        assert_eq!(quake.ids, ",ci40567,");
        assert_eq!(quake.longitude, -117.4951667);
        assert_eq!(quake.latitude, 33.9121667);
        assert_eq!(quake.depth_km, Some(7.52));
        assert_eq!(quake.occurred_at, Some(1_700_000_000_000));
        assert_eq!(quake.epicenter_ewkt(), "SRID=4326;POINT(-117.4951667 33.9121667)");
    }

    #[test]
    fn test_absent_properties_default() {
        let raw = json!({
            "id": "  nc7301  ",
            "properties": {},
            "geometry": { "coordinates": [-122.0, 37.5, null] }
        });

        let quake = normalize_feature(3, &raw).unwrap();

        assert_eq!(quake.usgs_id, "nc7301");
        assert_eq!(quake.title, "");
        assert_eq!(quake.status, "");
        assert_eq!(quake.mag, None);
        assert_eq!(quake.depth_km, None);
        assert_eq!(quake.occurred_at, None);
    }

    #[test]
    fn test_missing_properties_is_malformed() {
        let raw = json!({
            "id": "ak0001",
            "geometry": { "coordinates": [-150.0, 61.0, 20.0] }
        });

        let err = normalize_feature(7, &raw).unwrap_err();

        assert_eq!(err.index, 7);
        assert_eq!(err.usgs_id.as_deref(), Some("ak0001"));
        assert!(err.reason.contains("properties"));
    }

    #[test]
    fn test_missing_coordinates_is_malformed() {
        let raw = json!({
            "id": "ak0002",
            "properties": { "mag": 2.1 },
            "geometry": { "type": "Point" }
        });

        assert!(normalize_feature(0, &raw).is_err());
    }

    #[test]
    fn test_short_coordinates_is_malformed() {
        let raw = json!({
            "id": "ak0003",
            "properties": { "mag": 2.1 },
            "geometry": { "coordinates": [-150.0, 61.0] }
        });

        assert!(normalize_feature(0, &raw).is_err());
    }

    #[test]
    fn test_parse_payload_requires_features() {
        assert!(parse_payload(br#"{"metadata": {}}"#).is_err());
        assert!(parse_payload(b"not json").is_err());

        let payload = parse_payload(br#"{"metadata": {"count": 2}, "features": []}"#).unwrap();
        assert_eq!(payload.metadata.count, Some(2));
        assert!(payload.features.is_empty());
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(Some("  reviewed \n".to_string())), "reviewed");
        assert_eq!(clean_text(Some(String::new())), "");
        assert_eq!(clean_text(None), "");
    }
}
