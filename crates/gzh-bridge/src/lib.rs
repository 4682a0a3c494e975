//! # gzh-bridge
//!
//! Host-side bridge to the gzh orchestration engine: a long-lived native
//! service for bulk repository cloning and plugin execution, reachable only
//! through a fixed C ABI (`libgzh`).
//!
//! The bridge owns three concerns and delegates everything else to the
//! engine:
//! - session-handle lifecycle ([`Session`], [`SessionHandle`])
//! - marshalling between host values and C-layout records
//! - the cross-boundary ownership protocol (bridge frees what it sends,
//!   releases exactly once what it receives)
//!
//! ## Quick start
//!
//! ```no_run
//! use gzh_bridge::prelude::*;
//! use std::sync::Arc;
//!
//! let engine = Arc::new(Engine::locate()?);
//! let session = Session::create(engine, None)?;
//!
//! let request = BulkCloneRequest::new(r#"[{"type":"github"}]"#, "./repos");
//! let envelope = session.bulk_clone(&request)?;
//! if !envelope.success {
//!     eprintln!("clone failed: {:?}", envelope.error);
//! }
//! # Ok::<(), gzh_bridge::BridgeError>(())
//! ```
//!
//! Every call blocks for the duration of the underlying engine operation.
//! Bulk clone and plugin execution are long-running; hosts with a
//! latency-sensitive event loop should dispatch them to a worker pool.
//!
//! ## Crate structure
//!
//! This is a facade crate that re-exports from:
//! - [`gzh_bridge_core`] - host-side value types and errors
//! - [`gzh_bridge_ffi`] - engine ABI, dynamic loading, call surface

// Re-export core types
pub use gzh_bridge_core::{
    BridgeError, BridgeResult, BulkCloneRequest, ClientConfig, DEFAULT_PLUGIN_TIMEOUT_SECS,
    Envelope,
};

// Re-export the engine and call surface
pub use gzh_bridge_ffi::{Engine, EngineVtable, Session, SessionHandle};

// Re-export common dependencies that embedders need
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        BridgeError, BridgeResult, BulkCloneRequest, ClientConfig, DEFAULT_PLUGIN_TIMEOUT_SECS,
        Engine, Envelope, Session, SessionHandle,
    };
}
