//! gzh-bridge-core - Host-side value types for the gzh engine bridge
//!
//! This crate defines the structured values exchanged with the host and the
//! bridge's error taxonomy:
//! - [`ClientConfig`] for session creation
//! - [`BulkCloneRequest`] for bulk clone calls
//! - [`Envelope`] for translated engine results
//! - [`BridgeError`] for bridge-side failures
//!
//! It contains no FFI and no unsafe code; the C-layout records and the call
//! surface live in `gzh-bridge-ffi`.

mod config;
mod envelope;
mod error;
mod request;

pub use config::ClientConfig;
pub use envelope::Envelope;
pub use error::{BridgeError, BridgeResult};
pub use request::BulkCloneRequest;

/// Default timeout, in seconds, injected at the call surface when the host
/// executes a plugin without an explicit timeout.
pub const DEFAULT_PLUGIN_TIMEOUT_SECS: i32 = 30;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeError, BridgeResult, BulkCloneRequest, ClientConfig, DEFAULT_PLUGIN_TIMEOUT_SECS,
        Envelope,
    };
}
