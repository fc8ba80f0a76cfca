use spot_discovery_sdk::errors::SpotsError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Sign-in required")]
    Unauthenticated,

    #[error("User already voted on spot '{spot_id}'")]
    DuplicateVote { spot_id: String },

    #[error("Review {review_id} belongs to another user")]
    NotOwner { review_id: Uuid },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Persistence error: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

impl From<DomainError> for SpotsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::Unauthenticated => Self::Unauthenticated,
            DomainError::DuplicateVote { .. } => Self::DuplicateVote,
            DomainError::NotOwner { .. } => Self::NotOwner,
            DomainError::NotFound { what } => Self::not_found(what),
            DomainError::Persistence(_) => Self::internal(),
        }
    }
}
