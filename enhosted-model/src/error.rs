//! Error types for the console model.

use enhosted_collections::CollectionError;
use enhosted_marshal::MarshalError;
use thiserror::Error;

/// Errors raised while loading or editing console entities.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// A destination carries a `_type` the console does not know.
    #[error("unknown destination type: {0}")]
    UnknownDestinationType(String),

    /// A Redshift destination asks for hosted staging but no hosted bucket is
    /// configured.
    #[error("destination {0} uses hosted S3 but no hosted bucket is configured")]
    HostedS3Unavailable(String),

    /// A user can only be saved with exactly one project.
    #[error("user must have exactly one project, has {0}")]
    ProjectCount(usize),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
