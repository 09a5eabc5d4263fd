// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod datadog_repository;
pub mod template_loader;
