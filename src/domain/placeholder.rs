// Placeholder tokens substituted into dashboard templates
use super::dashboard::DashboardMeta;
use super::metrics::CodeQualityMetricName;
use chrono::{DateTime, SecondsFormat, Utc};

/// Names of every placeholder a template may reference, as `${name}`
pub const TOKEN_NAMES: [&str; 10] = [
    "title",
    "author",
    "date",
    "sonarBaseUrl",
    "componentName",
    "coverage_metric_name",
    "smells_metric_name",
    "vulnerabilities_metric_name",
    "security_hotspots_metric_name",
    "duplines_density_metric_name",
];

/// The marker form of a token name
pub fn marker(name: &str) -> String {
    format!("${{{}}}", name)
}

/// Values for the ten known placeholders for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderTokens {
    values: Vec<(&'static str, String)>,
}

impl PlaceholderTokens {
    pub fn new(
        meta: &DashboardMeta,
        metrics: &CodeQualityMetricName,
        date: DateTime<Utc>,
    ) -> Self {
        let values = vec![
            (TOKEN_NAMES[0], meta.title.clone()),
            (TOKEN_NAMES[1], meta.author.clone()),
            (TOKEN_NAMES[2], date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            (TOKEN_NAMES[3], meta.sonar_base_url.clone()),
            (TOKEN_NAMES[4], meta.component_name.clone()),
            (TOKEN_NAMES[5], metrics.coverage.clone()),
            (TOKEN_NAMES[6], metrics.smells.clone()),
            (TOKEN_NAMES[7], metrics.vulnerabilities.clone()),
            (TOKEN_NAMES[8], metrics.security_hotspots.clone()),
            (TOKEN_NAMES[9], metrics.dup_lines_density.clone()),
        ];
        Self { values }
    }

    /// Token name and value pairs, in substitution order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }
}
