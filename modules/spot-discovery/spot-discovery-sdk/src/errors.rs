//! Error types for the spot-discovery SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpotsError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Sign-in required")]
    Unauthenticated,

    #[error("Already rated this spot")]
    DuplicateVote,

    #[error("Only the author can change this review")]
    NotOwner,

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Internal error")]
    Internal,
}

impl SpotsError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
