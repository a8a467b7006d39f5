//! radio-browser directory client.
//!
//! One endpoint matters here: `/json/stations/search`. The directory answers
//! with an array of station objects whose field names are mapped straight
//! onto [`StationRecord`] via serde renames, so there is no intermediate wire
//! struct to shuttle through.

use terradio_proto::config::DirectoryConfig;
use terradio_proto::station::{StationQuery, StationRecord};
use tracing::debug;

use super::{SourceError, StationSource};

pub struct RadioBrowserSource {
    client: reqwest::Client,
    base_url: String,
}

impl RadioBrowserSource {
    /// The caller builds the `reqwest::Client` (and sets timeouts there —
    /// this core enforces none of its own).
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &DirectoryConfig) -> Self {
        Self::new(client, config.base_url.clone())
    }
}

/// Flattens a [`StationQuery`] into the directory's query-string parameters.
fn query_params(query: &StationQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", query.limit.to_string()),
        ("order", query.order.as_param().to_string()),
        ("reverse", query.descending.to_string()),
        ("hidebroken", query.exclude_broken.to_string()),
        ("has_geo_info", query.require_geo.to_string()),
    ];
    if let Some(country) = &query.country {
        params.push(("country", country.clone()));
    }
    if let Some(tag) = &query.tag {
        params.push(("tag", tag.clone()));
    }
    if let Some(name) = &query.name {
        params.push(("name", name.clone()));
    }
    params
}

impl StationSource for RadioBrowserSource {
    async fn search(&self, query: &StationQuery) -> Result<Vec<StationRecord>, SourceError> {
        let url = format!("{}/json/stations/search", self.base_url);
        debug!(%url, ?query, "querying station directory");

        let response = self
            .client
            .get(&url)
            .query(&query_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let records: Vec<StationRecord> = response.json().await?;
        debug!(count = records.len(), "directory answered");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_cover_the_recognized_options() {
        let query = StationQuery::top(150);
        let params = query_params(&query);
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("limit"), Some("150"));
        assert_eq!(get("order"), Some("votes"));
        assert_eq!(get("reverse"), Some("true"));
        assert_eq!(get("hidebroken"), Some("true"));
        assert_eq!(get("has_geo_info"), Some("true"));
        assert_eq!(get("country"), None);
        assert_eq!(get("tag"), None);
        assert_eq!(get("name"), None);
    }

    #[test]
    fn optional_filters_appear_only_when_set() {
        let query = StationQuery::by_country("Japan", 50).with_tag("jazz");
        let params = query_params(&query);
        assert!(params.contains(&("country", "Japan".to_string())));
        assert!(params.contains(&("tag", "jazz".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "name"));
    }
}
