//! Engine-to-host result ownership
//!
//! A result record returned by the engine is engine-owned memory until the
//! bridge calls `gzh_free_result` on it, exactly once. [`OwnedResult`]
//! guards that rule: release happens in `Drop`, so it runs on every exit
//! path, including conversion errors encountered while reading the record.

use crate::engine::FreeResultFn;
use crate::raw::GzhResult;
use gzh_bridge_core::{BridgeError, BridgeResult, Envelope};
use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;

/// An engine-owned result record, released exactly once on drop.
pub struct OwnedResult {
    ptr: *mut GzhResult,
    release: FreeResultFn,
}

impl OwnedResult {
    /// Take ownership of a result pointer returned by an engine call.
    ///
    /// A null pointer is [`BridgeError::NullResult`]; there is nothing to
    /// release in that case.
    ///
    /// # Safety
    /// `ptr` must be a record freshly returned by the engine that resolved
    /// `release`, not yet released, and not owned by any other guard.
    pub(crate) unsafe fn from_raw(ptr: *mut GzhResult, release: FreeResultFn) -> BridgeResult<Self> {
        if ptr.is_null() {
            return Err(BridgeError::NullResult);
        }
        Ok(Self { ptr, release })
    }

    /// Copy the record's fields into a host-owned [`Envelope`].
    ///
    /// Consumes the guard; the record is released when this returns,
    /// whether translation succeeded or not.
    pub fn translate(self) -> BridgeResult<Envelope> {
        // SAFETY: from_raw guarantees a non-null, live record.
        let raw = unsafe { &*self.ptr };

        let success = raw.success != 0;
        let error = copy_field(raw.error_msg, "error_msg")?;
        let data = copy_field(raw.data_json, "data_json")?;

        Ok(Envelope {
            success,
            error,
            data,
        })
    }
}

impl fmt::Debug for OwnedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedResult")
            .field("ptr", &self.ptr)
            .finish_non_exhaustive()
    }
}

impl Drop for OwnedResult {
    fn drop(&mut self) {
        // SAFETY: the pointer is live and this guard is its only owner;
        // Drop runs at most once.
        unsafe { (self.release)(self.ptr) };
    }
}

/// Copy one engine-owned string field into host memory. Null means the
/// field was not set, and stays `None` rather than becoming "".
fn copy_field(ptr: *const c_char, field: &'static str) -> BridgeResult<Option<String>> {
    if ptr.is_null() {
        return Ok(None);
    }
    // SAFETY: a non-null field in a live record points at a NUL-terminated
    // string owned by the engine until release.
    let bytes = unsafe { CStr::from_ptr(ptr) };
    let text = bytes
        .to_str()
        .map_err(|_| BridgeError::InvalidUtf8 { field })?;
    Ok(Some(text.to_owned()))
}
