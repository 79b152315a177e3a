use cardsmith_core::StoreError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Problems with the name field, caught before any store call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    Empty,

    #[error("Name must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Name must be at most {max} characters")]
    TooLong { max: usize },
}

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The name \"{name}\" is already taken")]
    Conflict { name: String },

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("No card found for \"{0}\"")]
    NotFound(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { name } => ServiceError::Conflict { name },
            other => ServiceError::Store(other),
        }
    }
}

impl ServiceError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict { .. })
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Validation(e) => e.to_string(),
            ServiceError::Conflict { name } => format!(
                "The name \"{name}\" is already taken. Please choose a different name."
            ),
            ServiceError::Store(_) => {
                "Could not reach the card store. Please try again.".to_string()
            }
            ServiceError::NotFound(name) => format!("No card found for \"{name}\"."),
        }
    }
}
