/*!
 * Event Loop
 *
 * Single-threaded host loop. Owns the table of parked async requests and
 * the receiving end of the completion channel. Completion logic and host
 * callbacks only ever run here, never on a pool thread.
 */

use super::IoSubstrate;
use crate::core::config::BridgeConfig;
use crate::core::errors::FsError;
use crate::core::types::RequestId;
use crate::fs::completion::CompletionHandler;
use crate::fs::request::{FsRequest, PendingReq, ReqWrap, RequestStatistics, RequestStats};
use ahash::RandomState;
use flume::{Receiver, TryRecvError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Host event loop with its I/O substrate
pub struct EventLoop {
    substrate: IoSubstrate,
    completions: Receiver<Box<FsRequest>>,
    pending: RefCell<HashMap<RequestId, PendingReq, RandomState>>,
    stats: Arc<RequestStats>,
}

impl EventLoop {
    /// Create the loop and start its worker pool
    pub fn new(config: BridgeConfig) -> Result<Self, FsError> {
        let (tx, rx) = flume::unbounded();
        let substrate = IoSubstrate::start(&config, tx)?;

        info!(pool_threads = substrate.pool_threads(), "Event loop initialized");

        Ok(Self {
            substrate,
            completions: rx,
            pending: RefCell::new(HashMap::with_hasher(RandomState::new())),
            stats: Arc::new(RequestStats::new()),
        })
    }

    /// Request lifecycle counters
    pub fn stats(&self) -> RequestStatistics {
        self.stats.snapshot()
    }

    pub(crate) fn request_stats(&self) -> &Arc<RequestStats> {
        &self.stats
    }

    /// Number of async requests awaiting completion
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run a sync request inline
    pub(crate) fn execute(&self, wrap: &mut ReqWrap) {
        self.substrate.execute(wrap.request_mut());
    }

    /// Dispatch an async request
    ///
    /// The wrapper is parked before scheduling. An immediate rejection runs
    /// the completion entry point before this returns.
    pub(crate) fn dispatch(&self, wrap: ReqWrap) {
        let (pending, req) = wrap.park();
        let id = pending.id();
        self.pending.borrow_mut().insert(id, pending);
        self.stats.record_dispatched_async();

        if let Err(req) = self.substrate.schedule(req) {
            self.stats.record_rejected_inline();
            self.complete(req);
        }
    }

    /// Completion entry point
    ///
    /// Runs exactly once per dispatched request: it removes the parked
    /// wrapper, builds the result, invokes the callback and releases.
    fn complete(&self, req: Box<FsRequest>) {
        let parked = self.pending.borrow_mut().remove(&req.id());
        let Some(parked) = parked else {
            warn!(request_id = req.id(), "Completion for unknown request");
            return;
        };

        let wrap = parked.resume(req);
        let result = CompletionHandler::complete(wrap.request());

        if let Some(callback) = wrap.callback() {
            debug!(
                request_id = wrap.id(),
                syscall = wrap.kind().name(),
                success = result.is_success(),
                "Invoking callback"
            );
            CompletionHandler::invoke(callback, result);
        }

        wrap.release();
    }

    /// Deliver at most one ready completion without blocking
    pub fn run_once(&self) -> bool {
        match self.completions.try_recv() {
            Ok(req) => {
                self.stats.record_completed_async();
                self.complete(req);
                true
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Block until every pending request has been delivered
    ///
    /// Callbacks may dispatch further requests; those are waited for too.
    /// Returns the number of completions processed.
    pub fn run(&self) -> usize {
        let mut processed = 0;

        while self.pending() > 0 {
            match self.completions.recv() {
                Ok(req) => {
                    self.stats.record_completed_async();
                    self.complete(req);
                    processed += 1;
                }
                Err(_) => {
                    warn!(pending = self.pending(), "Completion channel closed");
                    break;
                }
            }
        }

        processed
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().len();
        if pending > 0 {
            warn!(pending = pending, "Event loop dropped with pending requests");
        }
    }
}
