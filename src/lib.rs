/*!
 * fs-bridge Library
 * Host filesystem binding over a native async I/O substrate
 */

pub mod core;
pub mod fs;
pub mod host;
pub mod monitoring;
pub mod substrate;

// Re-exports
pub use crate::core::limits::{O_APPEND, O_CREAT, O_RDONLY, O_RDWR, O_TRUNC, O_WRONLY};
pub use crate::core::{BridgeConfig, ExecMode, FsError, Result};
pub use fs::{FsModule, RequestStatistics, StatRecord, SyscallError};
pub use host::{Callback, HostBuffer, Value};
pub use monitoring::init_tracing;
pub use substrate::EventLoop;
