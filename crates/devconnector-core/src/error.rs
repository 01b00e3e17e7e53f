//! Error types for the DevConnector profile backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FieldErrors;

/// A shared error type for every layer of the profile backend.
///
/// Variants are structured so the transport layer can hand them back to the
/// caller as data. Store-layer faults collapse into `StoreFailure`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProfileError {
    /// Caller input failed one of the validation gates.
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// No resource exists at the requested key.
    #[error("Entity not found: {entity_type} '{key}'")]
    NotFound { entity_type: String, key: String },

    /// The requested handle is held by another profile.
    #[error("Handle already exists: '{handle}'")]
    HandleConflict { handle: String },

    /// An append was attempted before the owner created a profile.
    #[error("No profile exists for owner '{owner}'")]
    ProfileNotFound { owner: String },

    /// The identity provider rejected the caller.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Store-layer fault (connectivity, unexpected constraint, exhausted retries)
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Schema migration of a persisted document failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProfileError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            key: key.into(),
        }
    }

    /// Creates a HandleConflict error
    pub fn handle_conflict(handle: impl Into<String>) -> Self {
        Self::HandleConflict {
            handle: handle.into(),
        }
    }

    /// Creates a ProfileNotFound error
    pub fn profile_not_found(owner: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            owner: owner.into(),
        }
    }

    /// Creates a StoreFailure error
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreFailure(message.into())
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation_failed(&self) -> bool {
        matches!(self, Self::ValidationFailed(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_handle_conflict(&self) -> bool {
        matches!(self, Self::HandleConflict { .. })
    }

    pub fn is_profile_not_found(&self) -> bool {
        matches!(self, Self::ProfileNotFound { .. })
    }

    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreFailure(_))
    }

    /// Returns the field-error mapping carried by a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }

    /// Renders the error as a flat `{field: message}` map for API responses.
    ///
    /// Validation failures return their own mapping. Handle conflicts are keyed
    /// `handle`, missing profiles `noprofile`. Everything else lands under
    /// `error`.
    pub fn to_field_map(&self) -> FieldErrors {
        match self {
            Self::ValidationFailed(errors) => errors.clone(),
            Self::HandleConflict { .. } => FieldErrors::single("handle", "Handle already exists"),
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => {
                FieldErrors::single("noprofile", "There is no profile for this user")
            }
            other => FieldErrors::single("error", other.to_string()),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<FieldErrors> for ProfileError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationFailed(errors)
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ProfileError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ProfileError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for ProfileError {
    fn from(err: version_migrate::MigrationError) -> Self {
        Self::Migration(err.to_string())
    }
}

/// Conversion from anyhow::Error, used at the bootstrap edge
impl From<anyhow::Error> for ProfileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ProfileError>`.
pub type Result<T> = std::result::Result<T, ProfileError>;
