//! Domain layer for the DevConnector profile backend.
//!
//! Holds the profile document model, validation gates, the store and
//! identity seams, and the shared error type. Nothing in this crate performs
//! I/O.

pub mod config;
pub mod error;
pub mod identity;
pub mod profile;
pub mod validation;

// Re-export common error type
pub use error::{ProfileError, Result};
