//! Credit application risk scoring and the analytics dataset that backs the dashboard.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod scoring;
pub mod telemetry;
