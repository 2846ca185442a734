//! Repository trait for community updates.

use crate::error::UpdateError;
use async_trait::async_trait;

/// Repository interface for writing to the `Communities` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCommunityRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_community.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Sets `ShortDescription` on the row whose `DomainName` matches, inside a
    /// single read-write transaction.
    ///
    /// Transient transaction conflicts are retried by the implementation and
    /// are never visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::NoRowsUpdated`] if no row matched `domain_name`.
    /// Returns [`UpdateError::Database`] on statement, commit or connection errors.
    async fn update_short_description(
        &self,
        domain_name: &str,
        short_description: &str,
    ) -> Result<(), UpdateError>;
}
