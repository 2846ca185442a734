//! Business logic services for the application layer.

pub mod update_service;

pub use update_service::{RunSummary, UpdateService};
