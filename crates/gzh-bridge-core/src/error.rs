//! Error types for bridge operations

use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type for bridge operations
///
/// These are the hard failures of the bridge itself. Operational failures
/// reported by the engine (a `success = false` envelope) are values, not
/// errors; the host inspects the [`Envelope`](crate::Envelope) fields.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A host value failed boundary validation (wrong shape, wrong type,
    /// missing required field). Raised before any allocation or engine call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A host string contains an interior NUL byte and cannot cross the
    /// boundary as a C string.
    #[error("string field `{field}` contains an interior NUL byte")]
    InteriorNul { field: &'static str },

    /// Failed to load the engine shared library.
    #[error("failed to load engine library: {0}")]
    LibraryLoad(String),

    /// A required entry point is missing from the engine library.
    #[error("engine symbol not found: {0}")]
    SymbolNotFound(String),

    /// The engine refused to create a session. No envelope exists for this
    /// failure; the sentinel is the engine's negative return code.
    #[error("engine failed to create a session (code {0})")]
    CreateFailed(i32),

    /// The engine returned a null result pointer where an envelope was
    /// expected.
    #[error("engine returned a null result")]
    NullResult,

    /// An envelope string returned by the engine is not valid UTF-8.
    #[error("engine returned invalid UTF-8 in field `{field}`")]
    InvalidUtf8 { field: &'static str },
}

impl BridgeError {
    /// True for errors raised at the host-value boundary, before the engine
    /// was involved.
    pub fn is_boundary_error(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidArgument(_) | BridgeError::InteriorNul { .. }
        )
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::InvalidArgument(err.to_string())
    }
}
