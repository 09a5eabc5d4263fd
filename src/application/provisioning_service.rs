// Provisioning service - Use case for creating a dashboard from a template
use crate::application::dashboard_repository::{CreatedDashboard, DashboardRepository};
use crate::application::substitution::{substitute, SubstitutionMode};
use crate::domain::dashboard::DashboardMeta;
use crate::domain::metrics::CodeQualityMetricName;
use crate::domain::placeholder::{marker, PlaceholderTokens, TOKEN_NAMES};
use crate::error::{ProvisionError, Result};
use crate::infrastructure::template_loader::TemplateSource;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Steps of a provisioning run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStage {
    CheckingExistence,
    DerivingMetrics,
    LoadingTemplate,
    Substituting,
    Submitting,
    Done,
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CheckingExistence => "checking existence",
            Self::DerivingMetrics => "deriving metrics",
            Self::LoadingTemplate => "loading template",
            Self::Substituting => "substituting",
            Self::Submitting => "submitting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Terminal state of a run
#[derive(Debug)]
pub enum ProvisionReport {
    Done(CreatedDashboard),
    Failed {
        stage: ProvisionStage,
        error: ProvisionError,
    },
}

impl ProvisionReport {
    /// The only place a stage result becomes a run outcome
    pub fn from_result(result: Result<CreatedDashboard>, stage: ProvisionStage) -> Self {
        match result {
            Ok(created) => Self::Done(created),
            Err(error) => Self::Failed { stage, error },
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Human readable failure message, if the run failed
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Done(_) => None,
            Self::Failed { error, .. } => Some(error.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct ProvisioningService {
    repository: Arc<dyn DashboardRepository>,
    template: TemplateSource,
    mode: SubstitutionMode,
}

impl ProvisioningService {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        template: TemplateSource,
        mode: SubstitutionMode,
    ) -> Self {
        Self {
            repository,
            template,
            mode,
        }
    }

    /// Whether a dashboard titled exactly `title` already exists
    pub async fn dashboard_exists(&self, title: &str) -> Result<bool> {
        let dashboards = self.repository.list_dashboards().await?;
        tracing::debug!("Matching '{}' against {} dashboards", title, dashboards.len());
        Ok(dashboards.iter().any(|d| d.has_title(title)))
    }

    /// Run every stage once, stopping at the first failure
    pub async fn provision(&self, meta: &DashboardMeta, now: DateTime<Utc>) -> ProvisionReport {
        let mut stage = ProvisionStage::CheckingExistence;
        let result = self.run_stages(meta, now, &mut stage).await;
        let report = ProvisionReport::from_result(result, stage);

        match &report {
            ProvisionReport::Done(created) => {
                tracing::info!("Dashboard '{}' created (status {})", meta.title, created.status)
            }
            ProvisionReport::Failed { stage, error } => {
                tracing::error!(kind = error.kind(), "Provisioning failed while {}: {}", stage, error)
            }
        }

        report
    }

    async fn run_stages(
        &self,
        meta: &DashboardMeta,
        now: DateTime<Utc>,
        stage: &mut ProvisionStage,
    ) -> Result<CreatedDashboard> {
        tracing::info!("Checking whether dashboard '{}' exists", meta.title);
        if self.dashboard_exists(&meta.title).await? {
            return Err(ProvisionError::DuplicateDashboard {
                title: meta.title.clone(),
            });
        }

        advance(stage, ProvisionStage::DerivingMetrics);
        let metrics = CodeQualityMetricName::from_component(&meta.component_name);
        tracing::debug!("Metric names: {:?}", metrics.all());

        advance(stage, ProvisionStage::LoadingTemplate);
        let template = self.template.load()?;
        let absent: Vec<&str> = TOKEN_NAMES
            .into_iter()
            .filter(|name| !template.contains(&marker(name)))
            .collect();
        if !absent.is_empty() {
            tracing::debug!("Template does not reference {:?}", absent);
        }

        advance(stage, ProvisionStage::Substituting);
        let tokens = PlaceholderTokens::new(meta, &metrics, now);
        let document = substitute(&template, &tokens, self.mode)?;

        advance(stage, ProvisionStage::Submitting);
        let created = self.repository.create_dashboard(document).await?;

        advance(stage, ProvisionStage::Done);
        Ok(created)
    }
}

fn advance(stage: &mut ProvisionStage, next: ProvisionStage) {
    tracing::debug!("Stage {} -> {}", stage, next);
    *stage = next;
}
