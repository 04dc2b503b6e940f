/*!
 * Core Types
 * Common types used across the bridge
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// File descriptor type (owned by the caller, never by the bridge)
pub type Fd = i32;

/// Request identifier, unique for the lifetime of the process
pub type RequestId = u64;

/// Native result code: non-negative value on success, negative errno on failure
pub type ResultCode = i64;

/// Execution model chosen for a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    /// Caller blocks until the syscall completes
    Sync,
    /// Call returns at once, completion arrives through a callback
    Async,
}

impl ExecMode {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExecMode::Sync => "sync",
            ExecMode::Async => "async",
        }
    }
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
