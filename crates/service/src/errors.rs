use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected before any storage interaction.
    #[error("validation error: {0}")]
    Validation(String),
    /// Carries the resource-specific, client-facing message.
    #[error("not found: {0}")]
    NotFound(String),
    /// Storage failure; the message is generic and safe to show to clients.
    #[error("{0}")]
    Persistence(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// Message meant for the transport boundary, without the variant prefix.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::Validation(m) | ServiceError::NotFound(m) | ServiceError::Persistence(m) => m.clone(),
            ServiceError::Model(models::errors::ModelError::Validation(m)) => m.clone(),
            ServiceError::Model(models::errors::ModelError::Db(_)) => "An internal error occurred".to_string(),
        }
    }
}
