//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod community_repository;

pub use community_repository::CommunityRepository;

#[cfg(test)]
pub use community_repository::MockCommunityRepository;
