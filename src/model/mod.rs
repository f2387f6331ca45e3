pub mod classifier;
pub mod tagger;
pub mod vectorizer;

use crate::config::ModelConfig;
use crate::error::Result;
use self::classifier::LinearClassifier;
use self::tagger::LexiconTagger;
use self::vectorizer::TfidfVectorizer;
use tracing::info;

/// The long-lived inference stack, loaded once at startup and shared
/// read-only across invocations. Any failure here must prevent the process
/// from serving at all.
pub struct ModelStack {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LinearClassifier,
    pub tagger: LexiconTagger,
}

pub fn load_model_stack(config: &ModelConfig) -> Result<ModelStack> {
    let vectorizer = TfidfVectorizer::fit_from_file(&config.training_path, config.max_features)?;
    let classifier = LinearClassifier::load(&config.classifier_path, vectorizer.dimension())?;
    let tagger = LexiconTagger::load(&config.lexicon_path)?;
    info!(
        vocabulary = ?vectorizer.vocabulary(),
        lexicon_entries = tagger.len(),
        "Model stack loaded"
    );
    Ok(ModelStack {
        vectorizer,
        classifier,
        tagger,
    })
}
