//! Store error types.

use thiserror::Error;

use crate::kind::EntityKind;

/// Errors that can occur at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// No document with the given external id exists in the collection.
    #[error("Document '{external_id}' not found in {kind}")]
    DocumentNotFound {
        /// The collection searched.
        kind: EntityKind,
        /// The backend-assigned document id.
        external_id: String,
    },

    /// A document could not be serialized or deserialized.
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns the error code for logs and structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STORE_BACKEND",
            Self::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            Self::Serialization(_) => "DOCUMENT_SERIALIZATION",
        }
    }
}

impl From<StoreError> for quipu_shared::AppError {
    fn from(err: StoreError) -> Self {
        Self::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StoreError::Backend("offline".into()).error_code(),
            "STORE_BACKEND"
        );
        assert_eq!(
            StoreError::DocumentNotFound {
                kind: EntityKind::Accounts,
                external_id: "abc".into(),
            }
            .error_code(),
            "DOCUMENT_NOT_FOUND"
        );
    }

    #[test]
    fn test_converts_to_app_error() {
        let err: quipu_shared::AppError = StoreError::Backend("offline".into()).into();
        assert_eq!(err.error_code(), "STORE_ERROR");
    }

    #[test]
    fn test_not_found_display_names_collection() {
        let err = StoreError::DocumentNotFound {
            kind: EntityKind::Credits,
            external_id: "abc".into(),
        };
        assert_eq!(err.to_string(), "Document 'abc' not found in credits");
    }
}
