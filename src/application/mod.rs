// Application layer - Funnel core and dashboard use cases
pub mod dashboard_service;
pub mod date_filter;
pub mod funnel_aggregator;
pub mod snapshot_service;
pub mod stage_classifier;
pub mod table_repository;

#[cfg(test)]
pub mod testing;
