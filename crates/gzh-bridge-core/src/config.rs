//! Session configuration passed to the engine at creation time

use crate::error::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize};

/// Configuration for a new engine session.
///
/// Every field is optional: `None` means "not set by the host", which
/// crosses the boundary as a zero scalar or null string pointer so the
/// engine applies its own default. This is distinct from `Some("")`, which
/// crosses as a valid empty string.
///
/// Field names at the host-value boundary use camelCase (`retryCount`,
/// `pluginDir`, ...); that mapping is part of the contract with existing
/// host-side callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Operation timeout, interpreted by the engine.
    pub timeout: Option<i64>,

    /// Retry count for engine-internal operations.
    pub retry_count: Option<u32>,

    /// Whether plugin support should be enabled for this session.
    pub enable_plugins: Option<bool>,

    /// Directory the engine loads plugins from.
    pub plugin_dir: Option<String>,

    /// Engine log level (validated by the engine, not the bridge).
    pub log_level: Option<String>,

    /// Engine log file path.
    pub log_file: Option<String>,
}

impl ClientConfig {
    /// Create an empty configuration (engine defaults for everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a host value.
    ///
    /// The value must be a JSON object; anything else is a boundary type
    /// error. Unknown keys are ignored, matching the transparent-conduit
    /// posture of the bridge.
    pub fn from_value(value: &serde_json::Value) -> BridgeResult<Self> {
        if !value.is_object() {
            return Err(BridgeError::InvalidArgument(
                "config must be an object".to_string(),
            ));
        }
        serde_json::from_value(value.clone()).map_err(BridgeError::from)
    }

    /// True when no field is set and a null config pointer should cross the
    /// boundary instead of a record.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
