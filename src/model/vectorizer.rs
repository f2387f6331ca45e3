use crate::app::ports::VectorizerPort;
use crate::error::{PipelineError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// TF-IDF vectorizer over whitespace tokens, fitted once from a corpus of
/// pre-cleaned documents. The vocabulary is the top-K terms by corpus
/// frequency (K frozen at fit time), indexed in alphabetical order so the
/// feature layout matches the classifier artifact it was trained alongside.
pub struct TfidfVectorizer {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fits from a JSON file containing an array of document strings.
    pub fn fit_from_file(path: impl AsRef<Path>, max_features: usize) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Model(format!(
                "Failed to read training data '{}': {}",
                path.display(),
                e
            ))
        })?;
        let documents: Vec<String> = serde_json::from_str(&content)?;
        Self::fit(&documents, max_features)
    }

    pub fn fit(documents: &[String], max_features: usize) -> Result<Self> {
        if documents.is_empty() {
            return Err(PipelineError::Model(
                "Training data contains no documents".to_string(),
            ));
        }

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in documents {
            let mut seen: Vec<&str> = Vec::new();
            for token in doc.split_whitespace() {
                *corpus_counts.entry(token).or_insert(0) += 1;
                if !seen.contains(&token) {
                    seen.push(token);
                    *document_frequency.entry(token).or_insert(0) += 1;
                }
            }
        }

        // Top-K by corpus frequency, term text breaking ties for determinism
        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let mut vocabulary: Vec<String> = ranked
            .into_iter()
            .take(max_features)
            .map(|(term, _)| term.to_string())
            .collect();
        vocabulary.sort();

        let n_docs = documents.len() as f64;
        let idf = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency.get(term.as_str()).copied().unwrap_or(0) as f64;
                // Smoothed IDF: never zero, never divides by zero
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok(Self { vocabulary, idf })
    }

    /// Width of the produced feature vectors.
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

impl VectorizerPort for TfidfVectorizer {
    fn transform(&self, cleaned_text: &str) -> Vec<f64> {
        let mut counts = vec![0usize; self.vocabulary.len()];
        for token in cleaned_text.split_whitespace() {
            if let Ok(idx) = self.vocabulary.binary_search_by(|term| term.as_str().cmp(token)) {
                counts[idx] += 1;
            }
        }

        let mut features: Vec<f64> = counts
            .iter()
            .zip(&self.idf)
            .map(|(&count, &idf)| count as f64 * idf)
            .collect();

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn vocabulary_is_top_k_alphabetical() {
        let corpus = docs(&[
            "fire fire flood",
            "fire earthquake",
            "flood storm earthquake quake",
        ]);
        let vectorizer = TfidfVectorizer::fit(&corpus, 3).unwrap();
        // fire:3, flood:2, earthquake:2 make the cut; storm/quake do not
        assert_eq!(vectorizer.vocabulary(), ["earthquake", "fire", "flood"]);
        assert_eq!(vectorizer.dimension(), 3);
    }

    #[test]
    fn transform_is_deterministic_and_normalized() {
        let corpus = docs(&["fire flood", "fire storm", "flood storm fire"]);
        let vectorizer = TfidfVectorizer::fit(&corpus, 3).unwrap();

        let a = vectorizer.transform("fire flood fire");
        let b = vectorizer.transform("fire flood fire");
        assert_eq!(a, b);

        let norm: f64 = a.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_vocabulary_text_maps_to_zero_vector() {
        let corpus = docs(&["fire flood", "fire storm"]);
        let vectorizer = TfidfVectorizer::fit(&corpus, 2).unwrap();
        let features = vectorizer.transform("sunny picnic weather");
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_corpus_is_a_model_error() {
        assert!(TfidfVectorizer::fit(&[], 5).is_err());
    }

    #[test]
    fn fits_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["fire flood city", "storm fire"]"#).unwrap();
        let vectorizer = TfidfVectorizer::fit_from_file(file.path(), 2).unwrap();
        assert_eq!(vectorizer.dimension(), 2);
    }
}
