//! gzh-bridge-ffi - Engine ABI and the safe call surface
//!
//! The bridge spans two ownership zones with one crossing rule per data
//! item:
//! - Strings crossing host→engine are bridge-allocated and bridge-freed
//!   after the call returns ([`ArgStrings`], plain `CString` locals).
//! - Records crossing engine→host are engine-allocated and released through
//!   `gzh_free_result`, exactly once ([`OwnedResult`]).
//!
//! [`Engine`] resolves the engine's entry points from a shared library (or
//! takes them directly via [`Engine::from_vtable`]); [`Session`] owns one
//! engine session handle and exposes the boundary operations: bulk clone,
//! list plugins, execute plugin, health check, and system metrics.

mod engine;
mod raw;
mod result;
mod session;
mod strings;

pub use engine::{
    BulkCloneFn, CreateSessionFn, DestroySessionFn, Engine, EngineVtable, ExecutePluginFn,
    FreeResultFn, SessionQueryFn,
};
pub use raw::{GzhBulkCloneRequest, GzhClientConfig, GzhResult};
pub use result::OwnedResult;
pub use session::{Session, SessionHandle};
pub use strings::ArgStrings;
