//! C-layout records crossing the engine boundary
//!
//! Field order and types mirror the engine's ABI exactly and must not be
//! rearranged. Absent optional string fields cross as null pointers, never
//! as empty strings; absent scalars cross as zero.

use std::os::raw::{c_char, c_int};
use std::ptr;

/// Session configuration record consumed by `gzh_client_create`.
///
/// String pointers are owned by the bridge for the duration of one call;
/// the engine copies what it needs before returning.
#[repr(C)]
#[derive(Debug)]
pub struct GzhClientConfig {
    /// Operation timeout (engine-interpreted unit).
    pub timeout: i64,
    /// Retry count, zero when unset.
    pub retry_count: c_int,
    /// Plugin support flag (0 or 1).
    pub enable_plugins: c_int,
    /// Plugin directory, or null when unset.
    pub plugin_dir: *const c_char,
    /// Log level, or null when unset.
    pub log_level: *const c_char,
    /// Log file path, or null when unset.
    pub log_file: *const c_char,
}

impl GzhClientConfig {
    /// An all-defaults record: zero scalars, null string pointers.
    pub fn empty() -> Self {
        Self {
            timeout: 0,
            retry_count: 0,
            enable_plugins: 0,
            plugin_dir: ptr::null(),
            log_level: ptr::null(),
            log_file: ptr::null(),
        }
    }
}

/// Bulk clone request record consumed by `gzh_bulk_clone`.
#[repr(C)]
#[derive(Debug)]
pub struct GzhBulkCloneRequest {
    /// JSON-encoded platform array, opaque to the bridge.
    pub platforms_json: *const c_char,
    /// Output directory path.
    pub output_dir: *const c_char,
    /// Number of parallel clone workers.
    pub concurrency: c_int,
    /// Clone strategy, or null when unset.
    pub strategy: *const c_char,
    /// Include-private flag (0 or 1).
    pub include_private: c_int,
    /// JSON-encoded filters, or null when unset.
    pub filters_json: *const c_char,
}

/// Result record produced by the engine.
///
/// The record and both strings are engine-owned until `gzh_free_result` is
/// called on the record pointer, exactly once. After release no field may
/// be read again.
#[repr(C)]
#[derive(Debug)]
pub struct GzhResult {
    /// Non-zero on success.
    pub success: c_int,
    /// Error message, or null when none was set.
    pub error_msg: *const c_char,
    /// JSON payload, or null when none was produced.
    pub data_json: *const c_char,
}
