/*!
 * Completion Handler
 *
 * One result-construction routine for both execution models, plus the two
 * thin delivery adapters:
 *
 * ```text
 *                   ┌────────────────────┐
 *  FsRequest ─────▶ │ CompletionHandler  │ ──▶ OperationResult
 *                   │     ::complete     │
 *                   └────────────────────┘
 *                             │
 *              ┌──────────────┴──────────────┐
 *              ▼                             ▼
 *     into_return (sync)            invoke (async)
 *   Ok(value) / Err(raised)     callback(null, payload) / callback(error)
 * ```
 */

use super::errors::{ErrorTranslator, SyscallError};
use super::request::{FsKind, FsRequest};
use super::stat::{StatMarshaler, StatRecord};
use crate::core::errors::FsError;
use crate::host::{Callback, Value};
use tracing::debug;

/// Operation-specific success payload
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// close
    None,
    /// open (descriptor), read and write (byte count)
    Int(i32),
    /// stat
    Stat(StatRecord),
}

impl Payload {
    pub fn into_value(self) -> Value {
        match self {
            Payload::None => Value::Undefined,
            Payload::Int(n) => Value::from(n),
            Payload::Stat(stat) => Value::Stat(stat),
        }
    }
}

/// Outcome of one operation, identical in sync and async mode
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Success(Payload),
    Failure(SyscallError),
}

impl OperationResult {
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, OperationResult::Failure(_))
    }

    pub fn into_result(self) -> Result<Payload, SyscallError> {
        match self {
            OperationResult::Success(payload) => Ok(payload),
            OperationResult::Failure(err) => Err(err),
        }
    }
}

/// Mode-agnostic completion routine
pub struct CompletionHandler;

impl CompletionHandler {
    /// Build the result of a completed native request
    pub fn complete(req: &FsRequest) -> OperationResult {
        let kind = req.kind();
        let result = req.result();

        if result < 0 {
            let err = ErrorTranslator::translate(result, kind.name());
            debug!(
                request_id = req.id(),
                syscall = kind.name(),
                errno = %err.errno,
                "Request failed"
            );
            return OperationResult::Failure(err);
        }

        match kind {
            FsKind::Close => OperationResult::Success(Payload::None),
            // Descriptors and byte counts are bounded by int32 arguments
            FsKind::Open | FsKind::Read | FsKind::Write => {
                OperationResult::Success(Payload::Int(result as i32))
            }
            FsKind::Stat => match req.statbuf() {
                Some(stat) => OperationResult::Success(Payload::Stat(StatMarshaler::marshal(stat))),
                None => OperationResult::Failure(ErrorTranslator::translate(
                    -(libc::EIO as i64),
                    kind.name(),
                )),
            },
        }
    }

    /// Sync adapter: success becomes the return value, failure is raised
    pub fn into_return(result: OperationResult) -> Result<Value, FsError> {
        match result {
            OperationResult::Success(payload) => Ok(payload.into_value()),
            OperationResult::Failure(err) => Err(FsError::Syscall(err)),
        }
    }

    /// Callback arguments: `(error)` on failure, `(null, payload)` on success
    /// and `(null)` for operations without a payload
    pub fn callback_args(result: OperationResult) -> Vec<Value> {
        match result {
            OperationResult::Failure(err) => vec![Value::Error(FsError::Syscall(err))],
            OperationResult::Success(Payload::None) => vec![Value::Null],
            OperationResult::Success(payload) => vec![Value::Null, payload.into_value()],
        }
    }

    /// Async adapter: invoke the bound callback once
    pub fn invoke(callback: &Callback, result: OperationResult) {
        let args = Self::callback_args(result);
        callback.call(&args);
    }
}
