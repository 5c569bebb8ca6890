use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::seed::SeedError;

/// Errors surfaced by catalog operations.
///
/// `InvalidArgument` and `NotFound` are the domain failures. `Unavailable`
/// only occurs when the store task is gone, `WriteRejected` when the running
/// store refuses a write, `DataSource` when a bulk load cannot be read.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Catalog store unavailable: {0}")]
    Unavailable(String),
    #[error("Catalog store rejected the write: {0}")]
    WriteRejected(String),
    #[error("Product data could not be loaded: {0}")]
    DataSource(String),
}

impl CatalogError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Status code a request layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            CatalogError::InvalidArgument(_) => 400,
            CatalogError::NotFound(_) => 404,
            CatalogError::Unavailable(_) | CatalogError::WriteRejected(_) | CatalogError::DataSource(_) => 500,
        }
    }

    /// Response body a request layer should send. Infrastructure failures are
    /// reported without detail.
    pub fn public_message(&self) -> String {
        match self {
            CatalogError::Unavailable(_) | CatalogError::WriteRejected(_) | CatalogError::DataSource(_) => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<SeedError> for CatalogError {
    fn from(e: SeedError) -> Self {
        CatalogError::DataSource(e.to_string())
    }
}

impl From<FrameworkError> for CatalogError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => CatalogError::Unavailable(e.to_string()),
            FrameworkError::Rejected(_) | FrameworkError::IdExhausted(_) => CatalogError::WriteRejected(e.to_string()),
        }
    }
}
