// Application layer - Provisioning use case and its ports
pub mod dashboard_repository;
pub mod provisioning_service;
pub mod substitution;
