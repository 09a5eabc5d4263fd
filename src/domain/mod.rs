// Domain layer - Dashboard, metric and placeholder models
pub mod dashboard;
pub mod metrics;
pub mod placeholder;
