use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON model spec: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid TOML model spec: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported spec format: {0}")]
    UnsupportedFormat(PathBuf),
}
