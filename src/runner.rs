//! Batch run setup: database pool, input, and update service lifecycle.

use crate::application::services::{RunSummary, UpdateService};
use crate::config::Config;
use crate::domain::repositories::CommunityRepository;
use crate::error::InputError;
use crate::infrastructure::input::CsvSource;
use crate::infrastructure::persistence::PgCommunityRepository;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Runs one batch with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - CSV input reader
/// - Update service
///
/// The pool is closed before returning, whether the run succeeded or not.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - The input file cannot be opened
/// - A row cannot be read or decoded
///
/// Individual row update failures are logged and never returned.
pub async fn run(config: Config) -> Result<RunSummary> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    let pool = Arc::new(pool);
    let repository = Arc::new(PgCommunityRepository::with_retry_policy(
        pool.clone(),
        config.retry,
    ));

    let result = process_file(
        repository,
        &config.input_path,
        config.has_headers,
        config.concurrency,
    )
    .await;

    pool.close().await;
    tracing::info!("Database connection closed");

    Ok(result?)
}

/// Opens `path` and applies every row through `repository`.
///
/// # Errors
///
/// Returns [`InputError::Open`] if the file cannot be opened and any other
/// [`InputError`] raised while reading rows.
pub async fn process_file<R: CommunityRepository + 'static>(
    repository: Arc<R>,
    path: &Path,
    has_headers: bool,
    concurrency: usize,
) -> Result<RunSummary, InputError> {
    let source = CsvSource::open(path, has_headers)?;
    tracing::info!("Reading {}", path.display());

    UpdateService::new(repository).run(source, concurrency).await
}
