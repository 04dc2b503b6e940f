/*!
 * Bridge Limits and Constants
 *
 * Centralized location for pool sizing and configuration keys.
 * Linux-compatible values are marked with [LINUX-COMPAT]
 */

// =============================================================================
// WORKER POOL
// =============================================================================

/// Default number of blocking worker threads
/// Matches the libuv default thread pool size
pub const DEFAULT_POOL_THREADS: usize = 4;

/// Upper bound for the worker pool size
/// Same ceiling libuv applies to UV_THREADPOOL_SIZE
pub const MAX_POOL_THREADS: usize = 128;

/// Default worker thread name
pub const DEFAULT_POOL_THREAD_NAME: &str = "fs-pool";

// =============================================================================
// ENVIRONMENT KEYS
// =============================================================================

/// Worker pool size override
pub const ENV_POOL_THREADS: &str = "FS_BRIDGE_POOL_THREADS";

/// Worker thread name override
pub const ENV_THREAD_NAME: &str = "FS_BRIDGE_THREAD_NAME";

/// Enables JSON trace output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "FS_BRIDGE_TRACE_JSON";

// =============================================================================
// OPEN FLAGS
// =============================================================================

/// Read-only access [LINUX-COMPAT]
pub const O_RDONLY: i32 = libc::O_RDONLY;

/// Write-only access [LINUX-COMPAT]
pub const O_WRONLY: i32 = libc::O_WRONLY;

/// Read-write access [LINUX-COMPAT]
pub const O_RDWR: i32 = libc::O_RDWR;

/// Create the file if missing [LINUX-COMPAT]
pub const O_CREAT: i32 = libc::O_CREAT;

/// Truncate on open [LINUX-COMPAT]
pub const O_TRUNC: i32 = libc::O_TRUNC;

/// Append on every write [LINUX-COMPAT]
pub const O_APPEND: i32 = libc::O_APPEND;
