// YAML template loading and JSON normalization
use crate::error::{ProvisionError, Result};
use std::path::{Path, PathBuf};

/// Template shipped with the binary
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/dashboard.yml");

/// Where the dashboard template comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    #[default]
    Default,
    File(PathBuf),
}

impl TemplateSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(Self::File).unwrap_or_default()
    }

    /// Load the template and render it as canonical JSON text
    pub fn load(&self) -> Result<String> {
        match self {
            Self::Default => yaml_to_json(DEFAULT_TEMPLATE),
            Self::File(path) => load_file(path),
        }
    }
}

fn load_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|source| ProvisionError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes of template from {}", text.len(), path.display());
    yaml_to_json(&text)
}

/// Parse YAML text, resolve `<<` merge keys and re-serialize it as two-space
/// indented JSON. Keys keep their template order.
pub fn yaml_to_json(text: &str) -> Result<String> {
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    yaml.apply_merge()?;
    let document: serde_json::Value = serde_yaml::from_value(yaml)?;
    Ok(serde_json::to_string_pretty(&document)?)
}
