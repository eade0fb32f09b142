//! Error types for traversal and metadata loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result of a visit step or of a visitor's value accessor.
pub type VisitResult<T> = Result<T, VisitError>;

/// Errors raised while dispatching or traversing metadata.
#[derive(Debug, Error)]
pub enum VisitError {
    /// A required element, slice or descriptor handle was absent.
    #[error("Value cannot be null (parameter '{param}')")]
    InvalidArgument { param: &'static str },

    /// The visitor does not implement the requested operation.
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    /// An overriding visit stopped the traversal on purpose.
    #[error("Traversal aborted: {reason}")]
    Aborted { reason: String },

    /// Any other failure raised by a visitor implementation.
    #[error(transparent)]
    Consumer(#[from] anyhow::Error),
}

impl VisitError {
    pub fn null_argument(param: &'static str) -> Self {
        Self::InvalidArgument { param }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported { operation: operation.into() }
    }

    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted { reason: reason.into() }
    }

    /// Name of the offending parameter for [`VisitError::InvalidArgument`].
    pub fn param_name(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { param } => Some(*param),
            _ => None,
        }
    }
}

/// Errors raised while reading a metadata model document.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read metadata model {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed metadata model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid metadata model: {reason}")]
    Invalid { reason: String },
}

impl ModelError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid { reason: reason.into() }
    }
}
