use crate::app::ports::ClassifierPort;
use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk classifier artifact: a frozen linear decision function.
#[derive(Debug, Deserialize)]
struct ClassifierArtifact {
    weights: Vec<f64>,
    bias: f64,
}

/// Pre-trained binary disaster classifier. Pure inference; the decision
/// boundary is frozen at load time.
#[derive(Debug)]
pub struct LinearClassifier {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearClassifier {
    /// Loads the artifact and checks its width against the vectorizer's
    /// feature dimension. A mismatch means the artifact and training data
    /// are out of sync, which must stop the process.
    pub fn load(path: impl AsRef<Path>, expected_dimension: usize) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Model(format!(
                "Failed to read classifier artifact '{}': {}",
                path.display(),
                e
            ))
        })?;
        let artifact: ClassifierArtifact = serde_json::from_str(&content)?;

        if artifact.weights.len() != expected_dimension {
            return Err(PipelineError::Model(format!(
                "Classifier expects {} features but vectorizer produces {}",
                artifact.weights.len(),
                expected_dimension
            )));
        }

        Ok(Self {
            weights: artifact.weights,
            bias: artifact.bias,
        })
    }

    pub fn from_parts(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }
}

impl ClassifierPort for LinearClassifier {
    fn predict(&self, features: &[f64]) -> bool {
        debug_assert_eq!(features.len(), self.weights.len());
        let score: f64 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        score + self.bias >= 0.0
    }
}
