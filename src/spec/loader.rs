use super::error::LoadError;
use super::model::Model;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Toml,
}

impl SpecFormat {
    /// Detect spec format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "json" => Some(SpecFormat::Json),
                "toml" => Some(SpecFormat::Toml),
                _ => None,
            })
    }
}

pub fn parse_model(text: &str, format: SpecFormat) -> Result<Model, LoadError> {
    let model: Model = match format {
        SpecFormat::Json => serde_json::from_str(text)?,
        SpecFormat::Toml => toml::from_str(text)?,
    };
    Ok(model)
}

pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    let format = SpecFormat::from_extension(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loading {:?} spec from {}", format, path.display());
    parse_model(&text, format)
}

/// Collect spec files under `dir` whose extension is in `extensions`, sorted by path.
pub fn discover_specs(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut specs: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
                .unwrap_or(false)
        })
        .collect();

    specs.sort();
    specs
}
