// Repository trait for remote dashboard access
use crate::domain::dashboard::DashboardRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Raw outcome of a successful creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDashboard {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// List every dashboard visible to the configured credentials
    async fn list_dashboards(&self) -> Result<Vec<DashboardRecord>>;

    /// Submit a finalized dashboard document as the request body
    async fn create_dashboard(&self, document: String) -> Result<CreatedDashboard>;
}
