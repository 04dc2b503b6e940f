/*!
 * Request Wrapper
 *
 * One in-flight filesystem operation: the native request context it owns
 * exclusively, the optional host callback, and its release accounting.
 *
 * Release is tied to a non-cloneable lifecycle token that moves with the
 * wrapper through every state (created, parked while the pool runs the
 * syscall, resumed on completion). The token is dropped exactly once,
 * whichever path the request takes.
 */

use super::stat::NativeStat;
use super::validator::BufferView;
use crate::core::types::{Fd, RequestId, ResultCode};
use crate::host::Callback;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Global request ID counter
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_request_id() -> RequestId {
    NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

/// Operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsKind {
    Close,
    Open,
    Read,
    Write,
    Stat,
}

impl FsKind {
    /// Syscall name attached to errors and traces
    pub const fn name(&self) -> &'static str {
        match self {
            FsKind::Close => "close",
            FsKind::Open => "open",
            FsKind::Read => "read",
            FsKind::Write => "write",
            FsKind::Stat => "stat",
        }
    }
}

impl fmt::Display for FsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation arguments as handed to the substrate
#[derive(Debug)]
pub enum FsOp {
    Close {
        fd: Fd,
    },
    Open {
        path: String,
        flags: i32,
        mode: i32,
    },
    Read {
        fd: Fd,
        view: BufferView,
        /// Negative means the current file position
        position: i64,
    },
    Write {
        fd: Fd,
        view: BufferView,
        /// Negative means the current file position
        position: i64,
    },
    Stat {
        path: String,
    },
}

impl FsOp {
    pub const fn kind(&self) -> FsKind {
        match self {
            FsOp::Close { .. } => FsKind::Close,
            FsOp::Open { .. } => FsKind::Open,
            FsOp::Read { .. } => FsKind::Read,
            FsOp::Write { .. } => FsKind::Write,
            FsOp::Stat { .. } => FsKind::Stat,
        }
    }
}

/// Native request context
///
/// Travels to a pool thread and back in async mode; never touches host
/// values other than the validated buffer window.
#[derive(Debug)]
pub struct FsRequest {
    id: RequestId,
    op: FsOp,
    result: ResultCode,
    statbuf: Option<NativeStat>,
}

impl FsRequest {
    pub fn new(op: FsOp) -> Self {
        Self {
            id: next_request_id(),
            op,
            result: 0,
            statbuf: None,
        }
    }

    #[inline]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> FsKind {
        self.op.kind()
    }

    #[inline]
    pub fn op(&self) -> &FsOp {
        &self.op
    }

    /// Non-negative value on success, negative errno on failure
    #[inline]
    pub fn result(&self) -> ResultCode {
        self.result
    }

    #[inline]
    pub fn set_result(&mut self, result: ResultCode) {
        self.result = result;
    }

    #[inline]
    pub fn statbuf(&self) -> Option<&NativeStat> {
        self.statbuf.as_ref()
    }

    #[inline]
    pub fn set_statbuf(&mut self, stat: NativeStat) {
        self.statbuf = Some(stat);
    }
}

/// Lifecycle counters shared by every request of one event loop
///
/// Cache-line aligned to prevent false sharing with pool threads
#[repr(C, align(64))]
#[derive(Default)]
pub struct RequestStats {
    created: AtomicU64,
    released: AtomicU64,
    dispatched_async: AtomicU64,
    completed_async: AtomicU64,
    rejected_inline: AtomicU64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_dispatched_async(&self) {
        self.dispatched_async.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_completed_async(&self) {
        self.completed_async.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_rejected_inline(&self) {
        self.rejected_inline.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time snapshot
    pub fn snapshot(&self) -> RequestStatistics {
        RequestStatistics {
            created: self.created.load(Ordering::Acquire),
            released: self.released.load(Ordering::Acquire),
            dispatched_async: self.dispatched_async.load(Ordering::Relaxed),
            completed_async: self.completed_async.load(Ordering::Relaxed),
            rejected_inline: self.rejected_inline.load(Ordering::Relaxed),
        }
    }
}

/// Public statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestStatistics {
    pub created: u64,
    pub released: u64,
    pub dispatched_async: u64,
    pub completed_async: u64,
    pub rejected_inline: u64,
}

impl RequestStatistics {
    /// Wrappers created but not yet released
    #[inline]
    pub fn in_flight(&self) -> u64 {
        self.created.saturating_sub(self.released)
    }
}

/// Release token; its drop is the single release point of a request
struct Lifecycle {
    id: RequestId,
    kind: FsKind,
    stats: Arc<RequestStats>,
}

impl Lifecycle {
    fn begin(id: RequestId, kind: FsKind, stats: Arc<RequestStats>) -> Self {
        stats.created.fetch_add(1, Ordering::AcqRel);
        trace!(request_id = id, syscall = kind.name(), "Request created");
        Self { id, kind, stats }
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.stats.released.fetch_add(1, Ordering::AcqRel);
        trace!(
            request_id = self.id,
            syscall = self.kind.name(),
            "Request released"
        );
    }
}

/// Wrapper owning one request and its optional callback
///
/// In sync mode it lives on the caller's stack and is released on scope
/// exit. In async mode it is parked in the event loop while the pool owns
/// the native request, then resumed and released by the completion path.
pub struct ReqWrap {
    lifecycle: Lifecycle,
    req: Box<FsRequest>,
    callback: Option<Callback>,
}

impl ReqWrap {
    /// Allocate native request state and bind the optional callback
    pub fn create(op: FsOp, callback: Option<Callback>, stats: &Arc<RequestStats>) -> Self {
        let req = Box::new(FsRequest::new(op));
        let lifecycle = Lifecycle::begin(req.id(), req.kind(), Arc::clone(stats));
        Self {
            lifecycle,
            req,
            callback,
        }
    }

    #[inline]
    pub fn id(&self) -> RequestId {
        self.lifecycle.id
    }

    #[inline]
    pub fn kind(&self) -> FsKind {
        self.lifecycle.kind
    }

    #[inline]
    pub fn request(&self) -> &FsRequest {
        &self.req
    }

    #[inline]
    pub fn request_mut(&mut self) -> &mut FsRequest {
        &mut self.req
    }

    #[inline]
    pub fn callback(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    /// Hand the native request out while keeping the callback on this thread
    pub fn park(self) -> (PendingReq, Box<FsRequest>) {
        let ReqWrap {
            lifecycle,
            req,
            callback,
        } = self;
        (
            PendingReq {
                lifecycle,
                callback,
            },
            req,
        )
    }

    /// Free the native request state
    ///
    /// Consumes the wrapper; a second release does not type-check.
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl fmt::Debug for ReqWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqWrap")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .field("async", &self.callback.is_some())
            .finish()
    }
}

/// Wrapper whose native request is currently owned by the substrate
pub struct PendingReq {
    lifecycle: Lifecycle,
    callback: Option<Callback>,
}

impl PendingReq {
    #[inline]
    pub fn id(&self) -> RequestId {
        self.lifecycle.id
    }

    #[inline]
    pub fn kind(&self) -> FsKind {
        self.lifecycle.kind
    }

    /// Reunite with the completed native request
    pub fn resume(self, req: Box<FsRequest>) -> ReqWrap {
        debug_assert_eq!(self.lifecycle.id, req.id(), "completion for a different request");
        let PendingReq {
            lifecycle,
            callback,
        } = self;
        ReqWrap {
            lifecycle,
            req,
            callback,
        }
    }
}
