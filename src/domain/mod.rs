//! Domain layer: the update record and the repository contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure. Orchestration lives
//! in [`crate::application::services`].

pub mod entities;
pub mod repositories;
