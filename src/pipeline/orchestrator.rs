use crate::app::ports::{
    ClassifierPort, EntityExtractorPort, GazetteerPort, ImageLocatorPort, VectorizerPort,
};
use crate::error::Result;
use crate::normalize::normalize;
use crate::types::{Coordinate, PipelineResult, RawSubmission};
use std::sync::Arc;
use tracing::{info, instrument};

/// Sequences one submission through the pipeline: normalize, classify, and on
/// a disaster verdict enrich with entities and resolved coordinates.
///
/// Holds only capability ports, so any stage can be swapped for a test double.
/// All state is per-invocation; the ports themselves are shared read-only.
pub struct Orchestrator {
    vectorizer: Arc<dyn VectorizerPort>,
    classifier: Arc<dyn ClassifierPort>,
    extractor: Arc<dyn EntityExtractorPort>,
    image_locator: Arc<dyn ImageLocatorPort>,
    gazetteer: Arc<dyn GazetteerPort>,
}

impl Orchestrator {
    pub fn new(
        vectorizer: Arc<dyn VectorizerPort>,
        classifier: Arc<dyn ClassifierPort>,
        extractor: Arc<dyn EntityExtractorPort>,
        image_locator: Arc<dyn ImageLocatorPort>,
        gazetteer: Arc<dyn GazetteerPort>,
    ) -> Self {
        Self {
            vectorizer,
            classifier,
            extractor,
            image_locator,
            gazetteer,
        }
    }

    fn is_disaster(&self, cleaned_text: &str) -> bool {
        let features = self.vectorizer.transform(cleaned_text);
        self.classifier.predict(&features)
    }

    /// Runs the full pipeline for one submission. Any remote failure aborts
    /// the invocation; no partial result is returned once enrichment started.
    #[instrument(skip(self, submission))]
    pub async fn process(&self, submission: &RawSubmission) -> Result<PipelineResult> {
        let (cleaned_text, hashtags) = normalize(&submission.text);

        if !self.is_disaster(&cleaned_text) {
            // Non-disaster posts short-circuit: no entity extraction and no
            // network calls may happen for them
            info!("Post classified as non-disaster, skipping enrichment");
            return Ok(PipelineResult::not_disaster(cleaned_text, hashtags));
        }

        let entities = self.extractor.extract_entities(&cleaned_text);
        let predictions = self.image_locator.classify_image(&submission.image_reference).await?;

        let mut coordinates = Vec::new();

        // The image classifier's top-ranked label leads the coordinate list
        if let Some(top) = predictions.first() {
            if let Some((latitude, longitude)) = self.gazetteer.resolve(&top.label).await? {
                coordinates.push(Coordinate {
                    entity: top.label.clone(),
                    latitude,
                    longitude,
                });
            }
        }

        // Then each place entity, sequentially, in extraction order.
        // Unresolved names are skipped; duplicates with the image-derived
        // coordinate are kept on purpose.
        for entity in entities.iter().filter(|e| e.is_place()) {
            if let Some((latitude, longitude)) = self.gazetteer.resolve(&entity.text).await? {
                coordinates.push(Coordinate {
                    entity: entity.text.clone(),
                    latitude,
                    longitude,
                });
            }
        }

        info!(
            entities = entities.len(),
            coordinates = coordinates.len(),
            "Disaster post enriched"
        );

        Ok(PipelineResult {
            cleaned_text,
            hashtags,
            entities,
            coordinates,
            is_disaster: true,
        })
    }
}
