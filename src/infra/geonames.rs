use crate::app::ports::GazetteerPort;
use crate::config::GeoNamesConfig;
use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// GeoNames serializes lat/lng as strings in some responses and numbers in
/// others; accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct GeoNamesMatch {
    lat: Option<NumberOrString>,
    lng: Option<NumberOrString>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(rename = "totalResultsCount", default)]
    total_results_count: u64,
    #[serde(default)]
    geonames: Vec<GeoNamesMatch>,
}

/// Client for the GeoNames place-name search service. Asks for a single best
/// match per query.
pub struct GeoNamesClient {
    client: reqwest::Client,
    config: GeoNamesConfig,
}

impl GeoNamesClient {
    pub fn new(config: GeoNamesConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

fn best_match(response: SearchResponse) -> Option<(f64, f64)> {
    if response.total_results_count == 0 {
        return None;
    }
    let top = response.geonames.into_iter().next()?;
    let lat = top.lat?.as_f64()?;
    let lng = top.lng?.as_f64()?;
    // The service reports zeroed coordinates for some placeholder records;
    // treat those as no match
    if lat == 0.0 || lng == 0.0 {
        return None;
    }
    Some((lat, lng))
}

#[async_trait]
impl GazetteerPort for GeoNamesClient {
    #[instrument(skip(self))]
    async fn resolve(&self, place_name: &str) -> Result<Option<(f64, f64)>> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", place_name),
                ("maxRows", "1"),
                ("username", self.config.username.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::RemoteService {
                service: "GeoNames",
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        let resolved = best_match(parsed);
        debug!(?resolved, "Gazetteer lookup finished");
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> SearchResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn string_coordinates_resolve() {
        let response = parse(
            r#"{"totalResultsCount": 42, "geonames": [{"lat": "34.0522", "lng": "-118.2437"}]}"#,
        );
        assert_eq!(best_match(response), Some((34.0522, -118.2437)));
    }

    #[test]
    fn numeric_coordinates_resolve() {
        let response =
            parse(r#"{"totalResultsCount": 1, "geonames": [{"lat": 48.8566, "lng": 2.3522}]}"#);
        assert_eq!(best_match(response), Some((48.8566, 2.3522)));
    }

    #[test]
    fn zero_results_is_absent() {
        let response = parse(r#"{"totalResultsCount": 0, "geonames": []}"#);
        assert_eq!(best_match(response), None);
    }

    #[test]
    fn zeroed_coordinates_are_absent() {
        let response =
            parse(r#"{"totalResultsCount": 1, "geonames": [{"lat": "0.0", "lng": "12.5"}]}"#);
        assert_eq!(best_match(response), None);
    }

    #[test]
    fn unparsable_coordinates_are_absent() {
        let response =
            parse(r#"{"totalResultsCount": 1, "geonames": [{"lat": "n/a", "lng": "12.5"}]}"#);
        assert_eq!(best_match(response), None);
    }

    #[test]
    fn positive_count_with_empty_rows_is_absent() {
        let response = parse(r#"{"totalResultsCount": 3, "geonames": []}"#);
        assert_eq!(best_match(response), None);
    }
}
