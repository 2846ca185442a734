//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters.
//!
//! # Repositories
//!
//! - [`PgCommunityRepository`] - Short description updates on `Communities`

pub mod pg_community_repository;
pub mod statement;

pub use pg_community_repository::{PgCommunityRepository, RetryPolicy, UPDATE_SHORT_DESCRIPTION_SQL};
pub use statement::Statement;
