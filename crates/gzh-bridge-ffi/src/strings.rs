//! Host-to-engine string ownership
//!
//! Every string crossing into the engine is a fresh heap copy owned by the
//! bridge for the duration of one call. [`ArgStrings`] collects those
//! copies so they are released together when the call frame ends, on every
//! exit path, including validation failures after partial allocation.

use gzh_bridge_core::{BridgeError, BridgeResult};
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Owned C string copies backing the pointer fields of one outbound record.
///
/// Pointers handed out by [`push`](Self::push) stay valid until the arena
/// is dropped: a `CString`'s heap buffer does not move when the backing
/// `Vec` reallocates.
#[derive(Default)]
pub struct ArgStrings {
    owned: Vec<CString>,
}

impl ArgStrings {
    pub fn new() -> Self {
        Self { owned: Vec::new() }
    }

    /// Copy `value` into the arena and return a pointer valid until drop.
    ///
    /// An interior NUL byte is a boundary error; `field` names the host
    /// field in the error.
    pub fn push(&mut self, field: &'static str, value: &str) -> BridgeResult<*const c_char> {
        let copy = CString::new(value).map_err(|_| BridgeError::InteriorNul { field })?;
        let ptr = copy.as_ptr();
        self.owned.push(copy);
        Ok(ptr)
    }

    /// Like [`push`](Self::push), but `None` crosses as a null pointer.
    ///
    /// `Some("")` is a valid empty string, not null; the engine
    /// distinguishes "not set" from "set to empty".
    pub fn push_opt(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> BridgeResult<*const c_char> {
        match value {
            Some(v) => self.push(field, v),
            None => Ok(ptr::null()),
        }
    }

    /// Number of strings currently owned.
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }
}
