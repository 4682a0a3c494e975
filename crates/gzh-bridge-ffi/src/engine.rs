//! Engine entry points and dynamic library loading
//!
//! The engine is an opaque collaborator reachable only through a fixed set
//! of C entry points. [`Engine`] holds a function-pointer table to those
//! entry points, either resolved from a shared library at runtime or
//! supplied directly for in-process engines and tests.

use crate::raw::{GzhBulkCloneRequest, GzhClientConfig, GzhResult};
use gzh_bridge_core::{BridgeError, BridgeResult};
use libloading::{Library, Symbol};
use std::fmt;
use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};

/// `gzh_client_create`: returns a session handle, or a negative sentinel.
pub type CreateSessionFn = unsafe extern "C" fn(config: *const GzhClientConfig) -> c_int;

/// `gzh_client_destroy`: releases a session. One destroy per handle.
pub type DestroySessionFn = unsafe extern "C" fn(handle: c_int);

/// Handle-only calls returning an engine-owned result record
/// (`gzh_client_health`, `gzh_list_plugins`, `gzh_get_system_metrics`).
pub type SessionQueryFn = unsafe extern "C" fn(handle: c_int) -> *mut GzhResult;

/// `gzh_bulk_clone`: one blocking bulk clone call.
pub type BulkCloneFn =
    unsafe extern "C" fn(handle: c_int, request: *const GzhBulkCloneRequest) -> *mut GzhResult;

/// `gzh_execute_plugin`: one blocking plugin invocation.
pub type ExecutePluginFn = unsafe extern "C" fn(
    handle: c_int,
    plugin: *const c_char,
    method: *const c_char,
    args_json: *const c_char,
    timeout: c_int,
) -> *mut GzhResult;

/// `gzh_free_result`: releases an engine-owned result record.
pub type FreeResultFn = unsafe extern "C" fn(result: *mut GzhResult);

/// Function pointers to the engine's entry points.
#[derive(Clone, Copy, Debug)]
pub struct EngineVtable {
    pub create: CreateSessionFn,
    pub destroy: DestroySessionFn,
    pub health: SessionQueryFn,
    pub bulk_clone: BulkCloneFn,
    pub list_plugins: SessionQueryFn,
    pub execute_plugin: ExecutePluginFn,
    pub system_metrics: SessionQueryFn,
    pub free_result: FreeResultFn,
}

/// A loaded engine.
///
/// Keeps the shared library alive for as long as any session may call into
/// it. The bridge performs synchronous, blocking calls through this table
/// and introduces no concurrency of its own.
pub struct Engine {
    vtable: EngineVtable,
    /// The loaded library (must outlive every function pointer in `vtable`).
    _library: Option<Library>,
}

impl Engine {
    /// Load the engine from a shared library at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> BridgeResult<Self> {
        let path = path.as_ref();

        // SAFETY: loading a shared library runs its initializers. The caller
        // is responsible for pointing at a trusted engine build.
        let library = unsafe { Library::new(path) }
            .map_err(|e| BridgeError::LibraryLoad(format!("{}: {}", path.display(), e)))?;

        let vtable = resolve_vtable(&library)?;

        tracing::debug!(path = %path.display(), "engine library loaded");

        Ok(Self {
            vtable,
            _library: Some(library),
        })
    }

    /// Locate and load the engine from conventional locations.
    ///
    /// Checks the directory named by `GZHCLIENT_LIB_PATH`, then the current
    /// directory and the system library directories, for the
    /// platform-specific library name.
    pub fn locate() -> BridgeResult<Self> {
        let candidates = candidate_paths();

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(BridgeError::LibraryLoad(format!(
            "could not find {} in any of: {}",
            library_name(),
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    /// Build an engine from an explicit entry-point table.
    ///
    /// For engines linked into the process, and for instrumented fakes in
    /// tests.
    pub fn from_vtable(vtable: EngineVtable) -> Self {
        Self {
            vtable,
            _library: None,
        }
    }

    pub(crate) fn vtable(&self) -> &EngineVtable {
        &self.vtable
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("dynamic", &self._library.is_some())
            .finish_non_exhaustive()
    }
}

/// Resolve every required entry point, failing on the first missing symbol.
fn resolve_vtable(library: &Library) -> BridgeResult<EngineVtable> {
    // The Symbol wrappers borrow the library; the plain function pointers
    // copied out of them stay valid while the Library is kept alive.
    let create: Symbol<CreateSessionFn> = get_symbol(library, b"gzh_client_create\0")?;
    let destroy: Symbol<DestroySessionFn> = get_symbol(library, b"gzh_client_destroy\0")?;
    let health: Symbol<SessionQueryFn> = get_symbol(library, b"gzh_client_health\0")?;
    let bulk_clone: Symbol<BulkCloneFn> = get_symbol(library, b"gzh_bulk_clone\0")?;
    let list_plugins: Symbol<SessionQueryFn> = get_symbol(library, b"gzh_list_plugins\0")?;
    let execute_plugin: Symbol<ExecutePluginFn> = get_symbol(library, b"gzh_execute_plugin\0")?;
    let system_metrics: Symbol<SessionQueryFn> = get_symbol(library, b"gzh_get_system_metrics\0")?;
    let free_result: Symbol<FreeResultFn> = get_symbol(library, b"gzh_free_result\0")?;

    Ok(EngineVtable {
        create: *create,
        destroy: *destroy,
        health: *health,
        bulk_clone: *bulk_clone,
        list_plugins: *list_plugins,
        execute_plugin: *execute_plugin,
        system_metrics: *system_metrics,
        free_result: *free_result,
    })
}

fn get_symbol<'lib, T>(library: &'lib Library, name: &[u8]) -> BridgeResult<Symbol<'lib, T>> {
    // SAFETY: the engine ABI fixes the signature behind each symbol name.
    unsafe { library.get(name) }.map_err(|e| {
        BridgeError::SymbolNotFound(format!(
            "{}: {}",
            String::from_utf8_lossy(&name[..name.len() - 1]),
            e
        ))
    })
}

/// Platform-specific engine library file name.
fn library_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "libgzh.dll"
    } else if cfg!(target_os = "macos") {
        "libgzh.dylib"
    } else {
        "libgzh.so"
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let name = library_name();
    let mut paths = Vec::new();

    if let Ok(dir) = std::env::var("GZHCLIENT_LIB_PATH") {
        paths.push(PathBuf::from(dir).join(name));
    }
    paths.push(PathBuf::from(name));
    if cfg!(unix) {
        paths.push(PathBuf::from("/usr/local/lib").join(name));
        paths.push(PathBuf::from("/usr/lib").join(name));
    }

    paths
}
