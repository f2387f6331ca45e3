use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{service} returned status {status}: {body}")]
    RemoteService {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Model loading failed: {0}")]
    Model(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("Server error: {0}")]
    Server(#[from] hyper::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
