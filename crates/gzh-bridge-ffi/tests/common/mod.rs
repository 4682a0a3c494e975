//! Instrumented in-process fake engine
//!
//! Implements the full engine entry-point table against shared counters so
//! tests can observe exactly what crossed the boundary: which strings
//! arrived (and whether absent fields arrived as null), how many sessions
//! are live, and how many result records were allocated and freed.
//!
//! The state is per test binary. [`setup`] serializes tests that touch it
//! and resets the counters.

#![allow(clippy::unwrap_used)]
#![allow(dead_code)] // not every binary uses every helper

use gzh_bridge_ffi::{Engine, EngineVtable, GzhBulkCloneRequest, GzhClientConfig, GzhResult};
use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashSet;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::sync::Arc;

/// Config record as observed by the fake engine during create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedConfig {
    pub timeout: i64,
    pub retry_count: i32,
    pub enable_plugins: i32,
    pub plugin_dir: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

/// Clone request record as observed by the fake engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedClone {
    pub platforms: Option<String>,
    pub output_dir: Option<String>,
    pub concurrency: i32,
    pub strategy: Option<String>,
    pub include_private: i32,
    pub filters: Option<String>,
}

/// Plugin execution arguments as observed by the fake engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPluginCall {
    pub plugin: String,
    pub method: String,
    pub args: String,
    pub timeout: i32,
}

/// Response scripted for the next envelope-producing call.
pub struct Scripted {
    pub success: bool,
    pub error: Option<Vec<u8>>,
    pub data: Option<Vec<u8>>,
}

#[derive(Default)]
pub struct FakeState {
    next_id: i32,
    pub live_sessions: HashSet<i32>,
    pub create_calls: usize,
    pub destroy_calls: Vec<i32>,
    /// Envelope-producing engine calls (everything but create/destroy).
    pub envelope_calls: usize,
    pub results_allocated: usize,
    pub results_freed: usize,
    pub fail_create: bool,
    pub scripted: Option<Scripted>,
    pub last_config: Option<ReceivedConfig>,
    pub last_clone: Option<ReceivedClone>,
    pub last_plugin: Option<ReceivedPluginCall>,
}

static STATE: Lazy<Mutex<FakeState>> = Lazy::new(|| Mutex::new(FakeState::default()));
static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialize access to the fake engine and reset its state.
pub fn setup() -> MutexGuard<'static, ()> {
    let guard = TEST_LOCK.lock();
    *STATE.lock() = FakeState::default();
    guard
}

/// Read or mutate the fake engine state.
pub fn with_state<R>(f: impl FnOnce(&mut FakeState) -> R) -> R {
    f(&mut STATE.lock())
}

/// Script the next envelope-producing call's result.
pub fn script(success: bool, error: Option<&[u8]>, data: Option<&[u8]>) {
    STATE.lock().scripted = Some(Scripted {
        success,
        error: error.map(<[u8]>::to_vec),
        data: data.map(<[u8]>::to_vec),
    });
}

/// An engine wired to the fake entry points.
pub fn engine() -> Arc<Engine> {
    Arc::new(Engine::from_vtable(vtable()))
}

pub fn vtable() -> EngineVtable {
    EngineVtable {
        create: fake_create,
        destroy: fake_destroy,
        health: fake_health,
        bulk_clone: fake_bulk_clone,
        list_plugins: fake_list_plugins,
        execute_plugin: fake_execute_plugin,
        system_metrics: fake_system_metrics,
        free_result: fake_free_result,
    }
}

fn copy_opt(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        // SAFETY: the bridge guarantees non-null fields point at live
        // NUL-terminated strings for the duration of the call.
        Some(
            unsafe { CStr::from_ptr(ptr) }
                .to_string_lossy()
                .into_owned(),
        )
    }
}

/// Allocate a result record the way the real engine does: record plus
/// strings on the heap, reclaimed only by `fake_free_result`.
fn alloc_result(
    st: &mut FakeState,
    success: bool,
    error: Option<&[u8]>,
    data: Option<&[u8]>,
) -> *mut GzhResult {
    st.results_allocated += 1;
    let to_ptr = |bytes: Option<&[u8]>| match bytes {
        Some(b) => CString::new(b).unwrap().into_raw().cast_const(),
        None => ptr::null(),
    };
    Box::into_raw(Box::new(GzhResult {
        success: c_int::from(success),
        error_msg: to_ptr(error),
        data_json: to_ptr(data),
    }))
}

/// Produce the scripted result if one is pending, else a default success
/// with the given payload.
fn respond(st: &mut FakeState, default_data: &[u8]) -> *mut GzhResult {
    match st.scripted.take() {
        Some(s) => alloc_result(st, s.success, s.error.as_deref(), s.data.as_deref()),
        None => alloc_result(st, true, None, Some(default_data)),
    }
}

fn check_session(st: &mut FakeState, handle: c_int) -> Option<*mut GzhResult> {
    if st.live_sessions.contains(&handle) {
        None
    } else {
        Some(alloc_result(st, false, Some(b"invalid session handle"), None))
    }
}

extern "C" fn fake_create(config: *const GzhClientConfig) -> c_int {
    let mut st = STATE.lock();
    st.create_calls += 1;

    st.last_config = if config.is_null() {
        None
    } else {
        // SAFETY: a non-null config points at a record the bridge keeps
        // alive for this call.
        let cfg = unsafe { &*config };
        Some(ReceivedConfig {
            timeout: cfg.timeout,
            retry_count: cfg.retry_count,
            enable_plugins: cfg.enable_plugins,
            plugin_dir: copy_opt(cfg.plugin_dir),
            log_level: copy_opt(cfg.log_level),
            log_file: copy_opt(cfg.log_file),
        })
    };

    if st.fail_create {
        return -1;
    }

    let id = st.next_id;
    st.next_id += 1;
    st.live_sessions.insert(id);
    id
}

extern "C" fn fake_destroy(handle: c_int) {
    let mut st = STATE.lock();
    st.destroy_calls.push(handle);
    // Unknown or already-destroyed handles are tolerated.
    st.live_sessions.remove(&handle);
}

extern "C" fn fake_health(handle: c_int) -> *mut GzhResult {
    let mut st = STATE.lock();
    st.envelope_calls += 1;
    if let Some(err) = check_session(&mut st, handle) {
        return err;
    }
    respond(&mut st, br#"{"overall":"healthy"}"#)
}

extern "C" fn fake_bulk_clone(handle: c_int, request: *const GzhBulkCloneRequest) -> *mut GzhResult {
    let mut st = STATE.lock();
    st.envelope_calls += 1;
    if let Some(err) = check_session(&mut st, handle) {
        return err;
    }
    if request.is_null() {
        return alloc_result(&mut st, false, Some(b"null request"), None);
    }

    // SAFETY: a non-null request points at a record the bridge keeps alive
    // for this call.
    let req = unsafe { &*request };
    st.last_clone = Some(ReceivedClone {
        platforms: copy_opt(req.platforms_json),
        output_dir: copy_opt(req.output_dir),
        concurrency: req.concurrency,
        strategy: copy_opt(req.strategy),
        include_private: req.include_private,
        filters: copy_opt(req.filters_json),
    });

    respond(&mut st, br#"{"total_repos":0}"#)
}

extern "C" fn fake_list_plugins(handle: c_int) -> *mut GzhResult {
    let mut st = STATE.lock();
    st.envelope_calls += 1;
    if let Some(err) = check_session(&mut st, handle) {
        return err;
    }
    respond(&mut st, b"[]")
}

extern "C" fn fake_execute_plugin(
    handle: c_int,
    plugin: *const c_char,
    method: *const c_char,
    args_json: *const c_char,
    timeout: c_int,
) -> *mut GzhResult {
    let mut st = STATE.lock();
    st.envelope_calls += 1;
    if let Some(err) = check_session(&mut st, handle) {
        return err;
    }

    st.last_plugin = Some(ReceivedPluginCall {
        plugin: copy_opt(plugin).unwrap_or_default(),
        method: copy_opt(method).unwrap_or_default(),
        args: copy_opt(args_json).unwrap_or_default(),
        timeout,
    });

    respond(&mut st, br#"{"result":null}"#)
}

extern "C" fn fake_system_metrics(handle: c_int) -> *mut GzhResult {
    let mut st = STATE.lock();
    st.envelope_calls += 1;
    if let Some(err) = check_session(&mut st, handle) {
        return err;
    }
    respond(&mut st, br#"{"cpu":{"usage":0.0}}"#)
}

extern "C" fn fake_free_result(result: *mut GzhResult) {
    if result.is_null() {
        return;
    }
    // SAFETY: records handed out by alloc_result are freed exactly once by
    // the bridge's ownership guard.
    unsafe {
        let record = Box::from_raw(result);
        if !record.error_msg.is_null() {
            drop(CString::from_raw(record.error_msg.cast_mut()));
        }
        if !record.data_json.is_null() {
            drop(CString::from_raw(record.data_json.cast_mut()));
        }
    }
    STATE.lock().results_freed += 1;
}
