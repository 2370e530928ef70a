//! Errors returned by collection operations.

use crate::Key;

/// Result alias used by fallible collection operations.
pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

/// Errors surfaced by [`Collection`](crate::Collection) operations.
///
/// Absent keys are not errors for most operations, they resolve to a default instead. Only
/// direct indexed access reports them.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// Direct indexed access on a key that is not present.
    #[error("undefined collection key `{0}`")]
    KeyNotFound(Key),
    /// [`Collection::push`](crate::Collection::push) ran out of integer keys.
    #[error("cannot push: the next integer key would exceed {}", i64::MAX)]
    KeyOverflow,
    /// A value was used where a comparable scalar, a number or a key is required.
    #[error("cannot {operation} {reason}")]
    TypeMismatch {
        /// The operation that rejected the value, e.g. `sort` or `sum`.
        operation: &'static str,
        /// What was wrong with the value.
        reason: String,
    },
    /// Encoding or decoding JSON failed.
    #[error("collection JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectionError {
    pub(crate) fn type_mismatch(operation: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!(target: "collection", operation, %reason, "type mismatch");
        Self::TypeMismatch { operation, reason }
    }
}
