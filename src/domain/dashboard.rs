// Dashboard domain model
use serde::Deserialize;

/// Run parameters describing the dashboard to provision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMeta {
    pub title: String,
    pub author: String,
    pub sonar_base_url: String,
    pub component_name: String,
}

impl DashboardMeta {
    pub fn new(
        title: String,
        author: String,
        sonar_base_url: String,
        component_name: String,
    ) -> Self {
        Self {
            title,
            author,
            sonar_base_url,
            component_name,
        }
    }
}

/// A dashboard as returned by the listing endpoint
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub layout_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_read_only: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub author_handle: Option<String>,
}

impl DashboardRecord {
    /// Exact title comparison; records without a title never match
    pub fn has_title(&self, title: &str) -> bool {
        self.title.as_deref() == Some(title)
    }
}
