//! PostgreSQL implementation of the community repository.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::repositories::CommunityRepository;
use crate::error::UpdateError;
use crate::infrastructure::persistence::statement::Statement;

/// Statement text and parameter names are a fixed contract with the table owner.
pub const UPDATE_SHORT_DESCRIPTION_SQL: &str =
    "UPDATE Communities SET ShortDescription = @shortDescription WHERE DomainName = @domainName";

/// Backoff settings for re-running a transaction after a serialization conflict.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt; 0 disables retrying.
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay_ms: 10,
            max_delay_ms: 1000,
        }
    }
}

/// PostgreSQL repository for the `Communities` table.
///
/// Each update runs in its own `SERIALIZABLE` transaction. Serialization
/// failures and deadlocks re-run the whole transaction with jittered
/// exponential backoff.
pub struct PgCommunityRepository {
    pool: Arc<PgPool>,
    retry: RetryPolicy,
}

impl PgCommunityRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_retry_policy(pool, RetryPolicy::default())
    }

    pub fn with_retry_policy(pool: Arc<PgPool>, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    async fn try_update(
        &self,
        domain_name: &str,
        short_description: &str,
    ) -> Result<(), UpdateError> {
        let stmt = Statement::new(UPDATE_SHORT_DESCRIPTION_SQL)
            .param("shortDescription", short_description)
            .param("domainName", domain_name)
            .to_positional()?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let result = stmt
            .binds
            .iter()
            .fold(sqlx::query(&stmt.sql), |query, value| query.bind(*value))
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(UpdateError::NoRowsUpdated);
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    async fn update_short_description(
        &self,
        domain_name: &str,
        short_description: &str,
    ) -> Result<(), UpdateError> {
        let strategy = ExponentialBackoff::from_millis(self.retry.base_delay_ms)
            .max_delay(Duration::from_millis(self.retry.max_delay_ms))
            .map(jitter)
            .take(self.retry.max_retries);

        RetryIf::start(
            strategy,
            move || async move {
                let result = self.try_update(domain_name, short_description).await;
                if let Err(ref e) = result
                    && e.is_transient()
                {
                    tracing::debug!(domain_name, error = %e, "transaction conflict, retrying");
                }
                result
            },
            |e: &UpdateError| e.is_transient(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_statement_renders_bound_parameters() {
        let stmt = Statement::new(UPDATE_SHORT_DESCRIPTION_SQL)
            .param("shortDescription", "s1")
            .param("domainName", "a.com");

        let rendered = stmt.to_positional().unwrap();

        assert_eq!(
            rendered.sql,
            "UPDATE Communities SET ShortDescription = $1 WHERE DomainName = $2"
        );
        assert_eq!(rendered.binds, vec!["s1", "a.com"]);
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_retries, 5);
        assert!(policy.base_delay_ms <= policy.max_delay_ms);
    }
}
