//! Input readers.
//!
//! - [`CsvSource`] - Comma-separated community rows

pub mod csv_source;

pub use csv_source::CsvSource;
