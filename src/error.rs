//! Error types for dashboard provisioning

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Every way a provisioning run can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The template file could not be read
    #[error("Failed to read template {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template is not valid YAML
    #[error("Failed to parse template: {0}")]
    TemplateParse(#[from] serde_yaml::Error),

    /// The template could not be rendered as JSON
    #[error("Failed to serialize template: {0}")]
    TemplateSerialize(#[from] serde_json::Error),

    /// Listing existing dashboards failed
    #[error("Failed to list dashboards: {0}")]
    RemoteList(String),

    /// A dashboard with the requested title is already present
    #[error("Dashboard {title} already exist. Process exit(1)!")]
    DuplicateDashboard { title: String },

    /// The creation request failed
    #[error("Failed to create dashboard: {0}")]
    RemoteCreate(String),
}

impl ProvisionError {
    pub fn remote_list(status: u16, body: impl AsRef<str>) -> Self {
        Self::RemoteList(format!("status {}: {}", status, body.as_ref()))
    }

    pub fn remote_create(status: u16, body: impl AsRef<str>) -> Self {
        Self::RemoteCreate(format!("status {}: {}", status, body.as_ref()))
    }

    /// Stable short name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TemplateRead { .. } => "template_read",
            Self::TemplateParse(_) => "template_parse",
            Self::TemplateSerialize(_) => "template_serialize",
            Self::RemoteList(_) => "remote_list",
            Self::DuplicateDashboard { .. } => "duplicate_dashboard",
            Self::RemoteCreate(_) => "remote_create",
        }
    }
}
