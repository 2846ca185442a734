//! Application layer services.
//!
//! Services consume repository traits and drive the batch: read a record,
//! apply it, log the outcome, move on.
//!
//! # Available Services
//!
//! - [`services::update_service::UpdateService`] - Per-row short description updates

pub mod services;
