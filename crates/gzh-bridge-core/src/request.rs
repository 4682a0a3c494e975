//! Bulk clone request host value

use crate::error::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};

fn default_concurrency() -> i32 {
    5
}

/// A bulk repository clone request.
///
/// `platforms` and `filters` are opaque pre-serialized JSON strings; the
/// engine owns their schema and parses them itself. The bridge never
/// validates their well-formedness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCloneRequest {
    /// JSON-encoded array of platform configurations (opaque to the bridge).
    pub platforms: String,

    /// Directory the engine clones repositories into.
    pub output_dir: String,

    /// Number of parallel clone workers the engine should run.
    #[serde(default = "default_concurrency")]
    pub concurrency: i32,

    /// Clone strategy, understood only by the engine. Absent crosses as a
    /// null pointer and the engine applies its default.
    #[serde(default)]
    pub strategy: Option<String>,

    /// Whether private repositories are included.
    #[serde(default)]
    pub include_private: bool,

    /// JSON-encoded filter criteria (opaque to the bridge).
    #[serde(default)]
    pub filters: Option<String>,
}

impl BulkCloneRequest {
    /// Create a request with only the required fields set.
    pub fn new(platforms: impl Into<String>, output_dir: impl Into<String>) -> Self {
        Self {
            platforms: platforms.into(),
            output_dir: output_dir.into(),
            concurrency: default_concurrency(),
            strategy: None,
            include_private: false,
            filters: None,
        }
    }

    /// Build a request from a host value.
    ///
    /// The value must be a JSON object with at least `platforms` and
    /// `outputDir`; anything else is a boundary type error raised before
    /// any allocation or engine call.
    pub fn from_value(value: &serde_json::Value) -> BridgeResult<Self> {
        if !value.is_object() {
            return Err(BridgeError::InvalidArgument(
                "bulk clone request must be an object".to_string(),
            ));
        }
        serde_json::from_value(value.clone()).map_err(BridgeError::from)
    }
}
