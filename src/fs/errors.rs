/*!
 * Error Translator
 * Maps native result codes into structured syscall errors
 */

use crate::core::types::ResultCode;
use nix::errno::Errno;
use serde::Serialize;
use thiserror::Error;

/// Failure reported by a native filesystem operation
///
/// Display matches the host convention: `ENOENT: no such file or directory, open`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{errno}: {description}, {syscall}")]
pub struct SyscallError {
    /// Negative errno, libuv convention
    pub code: i32,
    /// Errno symbol, e.g. `ENOENT`
    pub errno: String,
    /// Human-readable description
    pub description: String,
    /// Name of the syscall that was attempted
    pub syscall: &'static str,
}

impl SyscallError {
    /// Positive errno value
    #[inline]
    pub fn errno_value(&self) -> i32 {
        -self.code
    }
}

/// Stateless translator shared by the sync and async delivery paths
pub struct ErrorTranslator;

impl ErrorTranslator {
    /// Build a `SyscallError` for a negative result code
    ///
    /// The syscall name is taken from the caller, never inferred from the code.
    /// Codes that cannot be an errno map to `EIO`.
    pub fn translate(result: ResultCode, syscall: &'static str) -> SyscallError {
        let raw = result
            .checked_neg()
            .and_then(|errno| i32::try_from(errno).ok())
            .filter(|errno| *errno > 0)
            .unwrap_or(libc::EIO);

        let errno = Errno::from_raw(raw);

        SyscallError {
            code: -raw,
            errno: format!("{:?}", errno),
            description: errno.desc().to_lowercase(),
            syscall,
        }
    }
}
