//! Infrastructure layer: concrete input and persistence implementations.
//!
//! - [`input`] - CSV input reader
//! - [`persistence`] - PostgreSQL repository implementations

pub mod input;
pub mod persistence;
