//! Batch orchestration: feeds input records to the repository one by one.

use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};

use crate::domain::entities::CommunityUpdate;
use crate::domain::repositories::CommunityRepository;
use crate::error::{InputError, UpdateError};

/// Aggregate outcome of a run.
///
/// Only reported; individual row failures never change the run's result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub updated: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, joined: Result<bool, JoinError>) {
        match joined {
            Ok(true) => self.updated += 1,
            Ok(false) => self.failed += 1,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                tracing::error!(error = %e, "Update task did not complete");
                self.failed += 1;
            }
        }
    }
}

/// Applies [`CommunityUpdate`]s through a [`CommunityRepository`].
///
/// Rows are independent: a failed row is logged with its domain name and the
/// next row is still attempted. Only a failure to read input stops the run.
pub struct UpdateService<R: CommunityRepository> {
    repository: Arc<R>,
}

impl<R: CommunityRepository> Clone for UpdateService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CommunityRepository + 'static> UpdateService<R> {
    /// Creates a new update service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Applies a single update and logs its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::NoRowsUpdated`] if no row matched the domain name.
    /// Returns [`UpdateError::Database`] on database errors.
    pub async fn apply(&self, update: &CommunityUpdate) -> Result<(), UpdateError> {
        let result = self
            .repository
            .update_short_description(&update.domain_name, &update.short_description)
            .await;

        match &result {
            Ok(()) => tracing::info!("Updated ShortDescription for DomainName {}", update.domain_name),
            Err(e) => tracing::error!(
                "Failed to update ShortDescription for DomainName {}: {}",
                update.domain_name,
                e
            ),
        }

        result
    }

    /// Applies every record in input order.
    ///
    /// With `concurrency == 1` the next record is read only after the previous
    /// update has finished. With a larger value up to `concurrency` updates run
    /// at once; logging stays per row.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] yielded by `records`. No further records
    /// are read; updates already in flight finish and are not rolled back.
    pub async fn run<I>(&self, records: I, concurrency: usize) -> Result<RunSummary, InputError>
    where
        I: IntoIterator<Item = Result<CommunityUpdate, InputError>>,
    {
        let concurrency = concurrency.max(1);
        let mut summary = RunSummary::default();
        let mut in_flight = JoinSet::new();

        for record in records {
            let update = match record {
                Ok(update) => update,
                Err(e) => {
                    while let Some(joined) = in_flight.join_next().await {
                        summary.record(joined);
                    }
                    tracing::warn!(
                        attempted = summary.attempted,
                        updated = summary.updated,
                        failed = summary.failed,
                        "Input aborted, stopping before the next row"
                    );
                    return Err(e);
                }
            };

            summary.attempted += 1;
            let service = self.clone();
            in_flight.spawn(async move { service.apply(&update).await.is_ok() });

            while in_flight.len() >= concurrency {
                match in_flight.join_next().await {
                    Some(joined) => summary.record(joined),
                    None => break,
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            summary.record(joined);
        }

        tracing::info!(
            attempted = summary.attempted,
            updated = summary.updated,
            failed = summary.failed,
            "Finished processing input"
        );

        Ok(summary)
    }
}
