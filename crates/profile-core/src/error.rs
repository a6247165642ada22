//! Error types for profile-core

use crate::conflict::ConflictError;

/// Result type for profile-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in profile-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Equally-specific matching profiles disagree on one or more keys
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// A scope was constructed with arguments that break the scope contract
    #[error("Invalid {scope_type} scope: {reason}")]
    InvalidScope { scope_type: String, reason: String },

    /// A configuration key failed normalization
    #[error("Invalid config key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// No factory is registered for the requested scope type
    #[error("Unknown scope type: {scope_type}")]
    UnknownScopeType { scope_type: String },
}

impl Error {
    pub(crate) fn invalid_scope(scope_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidScope {
            scope_type: scope_type.into(),
            reason: reason.into(),
        }
    }
}
