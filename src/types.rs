use serde::{Deserialize, Serialize};

/// NER label consumed by the coordinate merge policy. All other labels are
/// surfaced for display but never resolved.
pub const PLACE_LABEL: &str = "GPE";

/// One submitted post: free-form text plus a reference to an attached image.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubmission {
    pub text: String,
    pub image_reference: String,
}

/// A named entity recognized in the cleaned text, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub fn is_place(&self) -> bool {
        self.label == PLACE_LABEL
    }
}

/// A ranked location guess from the image classifier, highest confidence first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationPrediction {
    pub label: String,
    pub confidence: f64,
}

/// A place name resolved to coordinates through the gazetteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub entity: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Full pipeline output for one submission. `coordinates` is ordered:
/// the image-derived coordinate first when present, then one entry per
/// resolved place entity in extraction order. Duplicates are intentional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub cleaned_text: String,
    pub hashtags: Vec<String>,
    pub entities: Vec<Entity>,
    pub coordinates: Vec<Coordinate>,
    pub is_disaster: bool,
}

impl PipelineResult {
    /// Result for a post classified as non-disaster: enrichment never ran.
    pub fn not_disaster(cleaned_text: String, hashtags: Vec<String>) -> Self {
        Self {
            cleaned_text,
            hashtags,
            entities: Vec::new(),
            coordinates: Vec::new(),
            is_disaster: false,
        }
    }
}
