//! The uniform result shape for boundary-crossing operations

use serde::{Deserialize, Serialize};

/// Result of one engine call, translated into host-owned memory.
///
/// Operational failures travel inside this value (`success = false`,
/// `error` set) rather than as bridge errors: setup failures are errors,
/// steady-state failures are values. `data` is the engine's JSON payload,
/// carried as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the engine reported success.
    pub success: bool,

    /// Human-readable error message. `None` iff the engine set no message.
    pub error: Option<String>,

    /// JSON-encoded payload. `None` iff the engine returned no payload.
    pub data: Option<String>,
}

impl Envelope {
    /// A successful envelope carrying a payload.
    pub fn ok(data: impl Into<String>) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data.into()),
        }
    }

    /// A successful envelope with no payload (a void success).
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    /// A failed envelope carrying an error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: None,
        }
    }

    /// True when the engine reported success.
    pub fn is_success(&self) -> bool {
        self.success
    }
}
