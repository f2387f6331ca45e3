use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Default credentials are the free-tier demo values documented in the
/// README; they are not secrets. Override via environment for real use.
const DEFAULT_PICARTA_TOKEN: &str = "U7XIEFTM9APVVD1IR4C6";
const DEFAULT_GEONAMES_USERNAME: &str = "istatieh";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub picarta: PicartaConfig,
    pub geonames: GeoNamesConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PicartaConfig {
    pub base_url: String,
    pub top_k: usize,
    /// Filled from PICARTA_API_TOKEN at load time, never from the file.
    #[serde(skip)]
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeoNamesConfig {
    pub base_url: String,
    /// Filled from GEONAMES_USERNAME at load time, never from the file.
    #[serde(skip)]
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub classifier_path: String,
    pub training_path: String,
    pub lexicon_path: String,
    pub max_features: usize,
}

impl Default for PicartaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://picarta.ai/classify".to_string(),
            top_k: 3,
            token: String::new(),
        }
    }
}

impl Default for GeoNamesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.geonames.org/searchJSON".to_string(),
            username: String::new(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            classifier_path: "data/classifier.json".to_string(),
            training_path: "data/training.json".to_string(),
            lexicon_path: "data/lexicon.json".to_string(),
            max_features: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            picarta: PicartaConfig::default(),
            geonames: GeoNamesConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Config {
    /// Loads config.toml if present, falling back to compiled-in defaults,
    /// then applies credential overrides from the environment.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config: Config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                PipelineError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        config.picarta.token =
            env::var("PICARTA_API_TOKEN").unwrap_or_else(|_| DEFAULT_PICARTA_TOKEN.to_string());
        config.geonames.username =
            env::var("GEONAMES_USERNAME").unwrap_or_else(|_| DEFAULT_GEONAMES_USERNAME.to_string());

        if config.model.max_features == 0 {
            return Err(PipelineError::Config(
                "model.max_features must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}
