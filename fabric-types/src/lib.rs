//! Primitive value types shared by every cluster-management description.
//!
//! This crate defines the pieces that the description families and the
//! native projection layer both depend on:
//! - Naming URIs (`fabric:/app/service`) and partition identifiers
//! - The single recoverable error kind raised by validation
//! - The [`Validate`] trait and the field-level checks used to implement it
//!
//! Descriptions themselves live in `fabric-description`; their native
//! layouts live in `fabric-ffi`.

mod ids;
pub mod validate;

pub use ids::{FABRIC_URI_SCHEME, FabricUri, PartitionId};
pub use validate::Validate;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or validating a description.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A description field violates a field-level or cross-field rule.
    #[error("invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    #[error("invalid fabric URI: {0}")]
    InvalidUri(String),

    #[error("invalid partition id: {0}")]
    InvalidPartitionId(#[from] uuid::Error),
}

impl Error {
    /// Creates an invalid-argument error for `field`.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the offending field name for invalid-argument errors.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Prefixes the field name with `parent.`, for errors raised by a nested description.
    #[must_use]
    pub fn within(self, parent: &str) -> Self {
        match self {
            Self::InvalidArgument { field, message } => Self::InvalidArgument {
                field: format!("{parent}.{field}"),
                message,
            },
            other => other,
        }
    }
}
