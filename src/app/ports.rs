use crate::error::Result;
use crate::types::{Entity, LocationPrediction};
use async_trait::async_trait;

/// Turns cleaned text into the fixed-width feature vector the classifier was
/// trained against. Fitted once at startup, read-only afterwards.
pub trait VectorizerPort: Send + Sync {
    fn transform(&self, cleaned_text: &str) -> Vec<f64>;
}

/// Frozen binary decision over a feature vector. Inference only, no learning.
pub trait ClassifierPort: Send + Sync {
    fn predict(&self, features: &[f64]) -> bool;
}

/// Named-entity recognition over cleaned text. Returns every entity in
/// source order; label filtering is the orchestrator's concern because the
/// full list is also surfaced for display.
pub trait EntityExtractorPort: Send + Sync {
    fn extract_entities(&self, cleaned_text: &str) -> Vec<Entity>;
}

/// Remote image-geolocation service. One outbound call per invocation;
/// a non-success response is fatal for the invocation.
#[async_trait]
pub trait ImageLocatorPort: Send + Sync {
    async fn classify_image(&self, image_reference: &str) -> Result<Vec<LocationPrediction>>;
}

/// Remote place-name lookup. `Ok(None)` means the service answered but found
/// nothing, which is a normal outcome; a non-success response is fatal.
#[async_trait]
pub trait GazetteerPort: Send + Sync {
    async fn resolve(&self, place_name: &str) -> Result<Option<(f64, f64)>>;
}
