//! Error types for the update pipeline.
//!
//! Errors come in two severities:
//!
//! - [`InputError`] is fatal. Anything that goes wrong while opening or decoding
//!   the input aborts the whole run.
//! - [`UpdateError`] is scoped to a single row. It is logged and the batch
//!   continues with the next row.

use std::path::PathBuf;

use crate::infrastructure::persistence::statement::StatementError;

/// PostgreSQL SQLSTATE for `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL SQLSTATE for `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";

/// Failure to apply one community update.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The transaction ran but no row matched the domain name.
    #[error("no rows updated")]
    NoRowsUpdated,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("invalid statement: {0}")]
    Statement(#[from] StatementError),
}

impl UpdateError {
    /// Returns true for conflicts that are resolved by re-running the whole
    /// transaction (serialization failures and deadlocks).
    pub fn is_transient(&self) -> bool {
        let UpdateError::Database(e) = self else {
            return false;
        };

        let Some(db_err) = e.as_database_error() else {
            return false;
        };

        matches!(
            db_err.code().as_deref(),
            Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)
        )
    }
}

/// Fatal failure while reading the input file.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to open CSV file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read from CSV file: {0}")]
    Read(#[from] csv::Error),

    /// A row had fewer fields than the positional layout requires.
    #[error("Failed to read from CSV file: line {line} has no field {index} ({name})")]
    MissingField {
        line: u64,
        index: usize,
        name: &'static str,
    },
}
