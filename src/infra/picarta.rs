use crate::app::ports::ImageLocatorPort;
use crate::config::PicartaConfig;
use crate::error::{PipelineError, Result};
use crate::types::LocationPrediction;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    #[serde(rename = "TOKEN")]
    token: &'a str,
    #[serde(rename = "IMAGE")]
    image: &'a str,
    #[serde(rename = "TOP_K")]
    top_k: usize,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    #[serde(default)]
    predictions: Vec<LocationPrediction>,
}

/// Client for the Picarta image-geolocation service.
pub struct PicartaClient {
    client: reqwest::Client,
    config: PicartaConfig,
}

impl PicartaClient {
    pub fn new(config: PicartaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ImageLocatorPort for PicartaClient {
    #[instrument(skip(self))]
    async fn classify_image(&self, image_reference: &str) -> Result<Vec<LocationPrediction>> {
        let request = ClassifyRequest {
            token: &self.config.token,
            image: image_reference,
            top_k: self.config.top_k,
        };
        let response = self
            .client
            .post(&self.config.base_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::RemoteService {
                service: "Picarta",
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ClassifyResponse = response.json().await?;
        debug!(
            predictions = parsed.predictions.len(),
            "Image classification returned"
        );
        Ok(parsed.predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_ranked_predictions() {
        let raw = r#"{"predictions": [
            {"label": "Los Angeles", "confidence": 0.91},
            {"label": "San Diego", "confidence": 0.04}
        ]}"#;
        let parsed: ClassifyResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.predictions.len(), 2);
        assert_eq!(parsed.predictions[0].label, "Los Angeles");
        assert!(parsed.predictions[0].confidence > parsed.predictions[1].confidence);
    }

    #[test]
    fn missing_predictions_key_is_empty_not_error() {
        let parsed: ClassifyResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.predictions.is_empty());
    }

    #[test]
    fn request_uses_service_field_names() {
        let request = ClassifyRequest {
            token: "tok",
            image: "http://example.com/a.jpg",
            top_k: 3,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["TOKEN"], "tok");
        assert_eq!(json["IMAGE"], "http://example.com/a.jpg");
        assert_eq!(json["TOP_K"], 3);
    }
}
