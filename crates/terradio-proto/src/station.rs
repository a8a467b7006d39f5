//! Station records and directory query shapes.
//!
//! `StationRecord` mirrors one entry of the radio-browser `/json/stations/*`
//! responses. Records are immutable once deserialized: a new query result set
//! replaces the old records wholesale, nothing is patched in place.

use serde::{Deserialize, Serialize};

// ── StationRecord ─────────────────────────────────────────────────────────────

/// One broadcast station as returned by the station directory.
///
/// `latitude`/`longitude` are optional on the wire. A record is only usable
/// on the globe when **both** are present; see [`StationRecord::geo_valid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Stable unique identifier assigned by the directory.
    #[serde(rename = "stationuuid")]
    pub id: String,
    pub name: String,
    /// Stream URL as registered (may be a playlist that needs resolving).
    #[serde(rename = "url")]
    pub stream_url: String,
    /// Directory-resolved direct stream URL.
    #[serde(rename = "url_resolved")]
    pub stream_url_resolved: String,
    #[serde(rename = "favicon")]
    pub icon_url: String,
    /// Comma-separated genre/locale tokens, e.g. `"jazz,downtempo,tokyo"`.
    pub tags: String,
    pub country: String,
    #[serde(rename = "countrycode")]
    pub country_code: String,
    pub language: String,
    /// Vote count on the directory; higher means more popular.
    #[serde(rename = "votes")]
    pub popularity: u32,
    pub codec: String,
    pub bitrate: u32,
    #[serde(rename = "geo_lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "geo_long")]
    pub longitude: Option<f64>,
}

impl StationRecord {
    /// True when the record carries a complete coordinate pair.
    ///
    /// A record with only one of the two coordinates is geo-invalid and is
    /// dropped by reconciliation — half a coordinate projects nowhere.
    pub fn geo_valid(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// The coordinate pair, when complete.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// URL to hand to the player: prefer the directory-resolved one.
    pub fn playable_url(&self) -> &str {
        if self.stream_url_resolved.is_empty() {
            &self.stream_url
        } else {
            &self.stream_url_resolved
        }
    }
}

// ── StationQuery ──────────────────────────────────────────────────────────────

/// Field the directory orders results by.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum QueryOrder {
    /// Order by vote count ("votes" on the wire).
    #[default]
    #[serde(rename = "votes")]
    Popularity,
}

impl QueryOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            QueryOrder::Popularity => "votes",
        }
    }
}

/// Parameterized directory query.
///
/// Build with one of the constructors, then layer optional filters:
///
/// ```
/// use terradio_proto::station::StationQuery;
/// let q = StationQuery::by_country("Japan", 50).with_tag("jazz");
/// assert_eq!(q.limit, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationQuery {
    pub limit: u32,
    pub order: QueryOrder,
    pub descending: bool,
    /// Skip stations the directory has marked as dead.
    pub exclude_broken: bool,
    /// Ask the directory to only return records with coordinates.
    pub require_geo: bool,
    pub country: Option<String>,
    pub tag: Option<String>,
    pub name: Option<String>,
}

impl Default for StationQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            order: QueryOrder::Popularity,
            descending: true,
            exclude_broken: true,
            require_geo: true,
            country: None,
            tag: None,
            name: None,
        }
    }
}

impl StationQuery {
    /// Global top-N by popularity.
    pub fn top(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn by_country(country: impl Into<String>, limit: u32) -> Self {
        Self {
            limit,
            country: Some(country.into()),
            ..Self::default()
        }
    }

    pub fn by_tag(tag: impl Into<String>, limit: u32) -> Self {
        Self {
            limit,
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Free-text name search.
    pub fn by_name(name: impl Into<String>, limit: u32) -> Self {
        Self {
            limit,
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

// ── SelectionState ────────────────────────────────────────────────────────────

/// The at-most-one currently selected station.
///
/// Set by a user pick; replaced by picking a different station; never cleared
/// automatically. Replaced wholesale by the orchestrator, same as the
/// catalog, so no concurrent path ever sees a half-updated value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub station_id: Option<String>,
}

impl SelectionState {
    pub fn select(&mut self, id: impl Into<String>) {
        self.station_id = Some(id.into());
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.station_id.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn record(id: &str, lat: Option<f64>, lon: Option<f64>) -> StationRecord {
        StationRecord {
            id: id.to_string(),
            name: format!("station-{id}"),
            stream_url: format!("http://example.com/{id}"),
            stream_url_resolved: format!("http://example.com/{id}/live"),
            icon_url: String::new(),
            tags: "test".to_string(),
            country: "Nowhere".to_string(),
            country_code: "NW".to_string(),
            language: "english".to_string(),
            popularity: 0,
            codec: "MP3".to_string(),
            bitrate: 128,
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn geo_valid_requires_both_coordinates() {
        assert!(record("a", Some(35.6), Some(139.7)).geo_valid());
        assert!(!record("b", Some(35.6), None).geo_valid());
        assert!(!record("c", None, Some(139.7)).geo_valid());
        assert!(!record("d", None, None).geo_valid());
    }

    #[test]
    fn playable_url_prefers_resolved() {
        let mut r = record("a", None, None);
        assert_eq!(r.playable_url(), "http://example.com/a/live");
        r.stream_url_resolved.clear();
        assert_eq!(r.playable_url(), "http://example.com/a");
    }

    #[test]
    fn wire_record_deserializes_with_null_geo() {
        let json = r#"{
            "stationuuid": "abc-123",
            "name": "Test FM",
            "url": "http://stream.test/",
            "url_resolved": "http://stream.test/live",
            "favicon": "",
            "tags": "jazz,late night",
            "country": "Japan",
            "countrycode": "JP",
            "language": "japanese",
            "votes": 4021,
            "codec": "MP3",
            "bitrate": 192,
            "geo_lat": null,
            "geo_long": 139.69
        }"#;
        let r: StationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.id, "abc-123");
        assert_eq!(r.popularity, 4021);
        assert!(!r.geo_valid());
    }

    #[test]
    fn selection_replaces_previous() {
        let mut sel = SelectionState::default();
        sel.select("x");
        assert!(sel.is_selected("x"));
        sel.select("y");
        assert!(sel.is_selected("y"));
        assert!(!sel.is_selected("x"));
    }
}
