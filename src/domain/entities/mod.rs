//! Core domain entities.
//!
//! - [`CommunityUpdate`] - One input row: a new short description keyed by domain name

pub mod community;

pub use community::CommunityUpdate;
