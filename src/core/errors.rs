/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

// Re-export SyscallError from the fs module
pub use crate::fs::errors::SyscallError;

/// Host-visible bridge error
///
/// `Argument` and `Range` are raised before any request exists.
/// `Syscall` is the only variant produced by a completed request.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum FsError {
    #[error("TypeError: {0}")]
    #[diagnostic(
        code(fs::argument_error),
        help("Check the number and types of the arguments passed to the fs binding.")
    )]
    Argument(String),

    #[error("RangeError: {0}")]
    #[diagnostic(
        code(fs::range_error),
        help("offset must be inside the buffer and offset + length must not exceed its capacity.")
    )]
    Range(&'static str),

    #[error(transparent)]
    #[diagnostic(code(fs::syscall_error))]
    Syscall(#[from] SyscallError),

    #[error("Runtime error: {0}")]
    #[diagnostic(
        code(fs::runtime_error),
        help("The I/O substrate could not be started. Check thread limits and configuration.")
    )]
    Runtime(String),
}

impl FsError {
    /// Create an argument (type mismatch) error
    #[inline]
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Create a range error
    #[inline]
    pub fn range(msg: &'static str) -> Self {
        Self::Range(msg)
    }

    /// Syscall name if this error came from a completed request
    #[inline]
    pub fn syscall(&self) -> Option<&'static str> {
        match self {
            FsError::Syscall(err) => Some(err.syscall),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_argument(&self) -> bool {
        matches!(self, FsError::Argument(_))
    }

    #[inline]
    pub const fn is_range(&self) -> bool {
        matches!(self, FsError::Range(_))
    }

    #[inline]
    pub const fn is_syscall(&self) -> bool {
        matches!(self, FsError::Syscall(_))
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        FsError::Runtime(err.to_string())
    }
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, FsError>;
