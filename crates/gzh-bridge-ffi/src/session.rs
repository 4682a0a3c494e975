//! Session lifecycle and the boundary call surface

use crate::engine::{Engine, SessionQueryFn};
use crate::raw::{GzhBulkCloneRequest, GzhClientConfig, GzhResult};
use crate::result::OwnedResult;
use crate::strings::ArgStrings;
use gzh_bridge_core::{
    BridgeError, BridgeResult, BulkCloneRequest, ClientConfig, DEFAULT_PLUGIN_TIMEOUT_SECS,
    Envelope,
};
use std::ffi::CString;
use std::fmt;
use std::os::raw::c_int;
use std::ptr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Opaque identifier for one live engine session.
///
/// Handles are minted only by [`Session::create`]; there is no public
/// constructor, so a handle value always originated from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(c_int);

impl SessionHandle {
    /// The engine's integer identifier for this session.
    pub fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One engine session and the six boundary operations on it.
///
/// Every method performs a single synchronous, blocking call into the
/// engine: no hidden background work, no callback registration, no bridge
/// locks. Concurrent calls on the same session from multiple threads are
/// safe only if the engine's session implementation is internally
/// synchronized; the bridge assumes but does not enforce this.
///
/// Dropping a `Session` destroys the engine session. [`close`](Self::close)
/// may be called explicitly; the bridge issues at most one destroy per
/// handle regardless of how many times close runs.
#[derive(Debug)]
pub struct Session {
    engine: Arc<Engine>,
    handle: SessionHandle,
    /// Destroy-once guard; the engine is not required to tolerate a second
    /// destroy for the same handle.
    destroyed: AtomicBool,
}

impl Session {
    /// Create a new engine session.
    ///
    /// `None` crosses the boundary as a null configuration pointer and the
    /// engine applies all defaults. A present config becomes a fully
    /// populated record: absent string fields as null pointers, absent
    /// scalars as zero. Config string copies are owned by this call frame
    /// and released after the engine returns, on success and failure alike.
    ///
    /// A negative handle from the engine is a hard construction error
    /// ([`BridgeError::CreateFailed`]); no envelope exists to inspect.
    pub fn create(engine: Arc<Engine>, config: Option<&ClientConfig>) -> BridgeResult<Self> {
        let mut args = ArgStrings::new();
        let record;
        let config_ptr: *const GzhClientConfig = match config {
            None => ptr::null(),
            Some(cfg) => {
                record = GzhClientConfig {
                    timeout: cfg.timeout.unwrap_or(0),
                    // The ABI field is a signed int; a count that does not
                    // fit must not wrap to a negative value.
                    retry_count: c_int::try_from(cfg.retry_count.unwrap_or(0)).map_err(|_| {
                        BridgeError::InvalidArgument(
                            "retryCount exceeds the engine's integer range".to_string(),
                        )
                    })?,
                    enable_plugins: c_int::from(cfg.enable_plugins == Some(true)),
                    plugin_dir: args.push_opt("pluginDir", cfg.plugin_dir.as_deref())?,
                    log_level: args.push_opt("logLevel", cfg.log_level.as_deref())?,
                    log_file: args.push_opt("logFile", cfg.log_file.as_deref())?,
                };
                &record
            }
        };

        // SAFETY: config_ptr is null or points at `record`, whose string
        // fields are backed by `args` for the duration of the call.
        let id = unsafe { (engine.vtable().create)(config_ptr) };
        drop(args);

        if id < 0 {
            tracing::warn!(code = id, "engine refused to create a session");
            return Err(BridgeError::CreateFailed(id));
        }

        tracing::debug!(handle = id, "engine session created");
        Ok(Self {
            engine,
            handle: SessionHandle(id),
            destroyed: AtomicBool::new(false),
        })
    }

    /// Create a session from a host configuration value.
    ///
    /// The value must be a JSON object; boundary validation happens before
    /// any allocation or engine call.
    pub fn create_value(
        engine: Arc<Engine>,
        config: Option<&serde_json::Value>,
    ) -> BridgeResult<Self> {
        let config = config.map(ClientConfig::from_value).transpose()?;
        Self::create(engine, config.as_ref())
    }

    /// The handle the engine minted for this session.
    pub fn handle(&self) -> SessionHandle {
        self.handle
    }

    /// Destroy the engine session.
    ///
    /// Idempotent from the bridge's perspective: only the first close
    /// reaches the engine. Safe to call on a session whose engine side has
    /// already failed; destroy has no result to inspect.
    pub fn close(&self) {
        if !self.destroyed.swap(true, Ordering::SeqCst) {
            tracing::debug!(handle = %self.handle, "destroying engine session");
            // SAFETY: the destroy-once guard above makes this the only
            // destroy the engine sees for this handle.
            unsafe { (self.engine.vtable().destroy)(self.handle.0) };
        }
    }

    /// Run a bulk repository clone.
    ///
    /// Every present string field is copied into bridge-owned memory that
    /// outlives the blocking call and is freed unconditionally afterwards;
    /// absent optional fields cross as null pointers. Concurrency inside
    /// the clone is the engine's job; this is one blocking call.
    pub fn bulk_clone(&self, request: &BulkCloneRequest) -> BridgeResult<Envelope> {
        let mut args = ArgStrings::new();
        let record = GzhBulkCloneRequest {
            platforms_json: args.push("platforms", &request.platforms)?,
            output_dir: args.push("outputDir", &request.output_dir)?,
            concurrency: request.concurrency,
            strategy: args.push_opt("strategy", request.strategy.as_deref())?,
            include_private: c_int::from(request.include_private),
            filters_json: args.push_opt("filters", request.filters.as_deref())?,
        };

        // SAFETY: `record` and the strings behind it stay alive until after
        // the call returns; the engine treats null fields as not provided.
        let result = unsafe { (self.engine.vtable().bulk_clone)(self.handle.0, &record) };
        drop(args);

        self.translate(result)
    }

    /// Run a bulk clone from a host request value.
    ///
    /// Shape errors are raised here, before any allocation, so there is no
    /// partial state to clean up and the engine is never called.
    pub fn bulk_clone_value(&self, request: &serde_json::Value) -> BridgeResult<Envelope> {
        let request = BulkCloneRequest::from_value(request)?;
        self.bulk_clone(&request)
    }

    /// List the plugins available to this session.
    pub fn list_plugins(&self) -> BridgeResult<Envelope> {
        self.simple_call(self.engine.vtable().list_plugins)
    }

    /// Execute a plugin method.
    ///
    /// `timeout` is in seconds; `None` injects
    /// [`DEFAULT_PLUGIN_TIMEOUT_SECS`] here at the call surface. The engine
    /// interprets the timeout; the bridge keeps no watchdog, and a timed-out
    /// call still reports through the envelope.
    pub fn execute_plugin(
        &self,
        plugin: &str,
        method: &str,
        args_json: &str,
        timeout: Option<i32>,
    ) -> BridgeResult<Envelope> {
        let timeout = timeout.unwrap_or(DEFAULT_PLUGIN_TIMEOUT_SECS);

        let plugin_c = CString::new(plugin).map_err(|_| BridgeError::InteriorNul { field: "plugin" })?;
        let method_c = CString::new(method).map_err(|_| BridgeError::InteriorNul { field: "method" })?;
        let args_c =
            CString::new(args_json).map_err(|_| BridgeError::InteriorNul { field: "args" })?;

        // The three CString locals outlive the blocking call below; they are
        // released when this frame returns.
        let result = unsafe {
            (self.engine.vtable().execute_plugin)(
                self.handle.0,
                plugin_c.as_ptr(),
                method_c.as_ptr(),
                args_c.as_ptr(),
                timeout,
            )
        };

        self.translate(result)
    }

    /// Check the health of this session.
    pub fn health(&self) -> BridgeResult<Envelope> {
        self.simple_call(self.engine.vtable().health)
    }

    /// Fetch the engine's current system metrics.
    pub fn system_metrics(&self) -> BridgeResult<Envelope> {
        self.simple_call(self.engine.vtable().system_metrics)
    }

    /// Handle-only call composition: one blocking call, then envelope
    /// translation. The structural baseline the other operations extend.
    fn simple_call(&self, entry: SessionQueryFn) -> BridgeResult<Envelope> {
        // SAFETY: entry is one of this engine's handle-only entry points.
        let result = unsafe { entry(self.handle.0) };
        self.translate(result)
    }

    /// Translate and release an engine result. Release happens exactly once
    /// on every path, including translation errors.
    fn translate(&self, result: *mut GzhResult) -> BridgeResult<Envelope> {
        // SAFETY: `result` was just returned by this engine and is owned by
        // no other guard.
        let owned = unsafe { OwnedResult::from_raw(result, self.engine.vtable().free_result) }?;
        owned.translate()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
