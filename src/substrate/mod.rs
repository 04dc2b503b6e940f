/*!
 * Async I/O Substrate
 *
 * The native side of the bridge:
 * - syscalls: the OS calls themselves
 * - pool: blocking worker threads for scheduled requests
 * - event_loop: the host's single-threaded loop receiving completions
 *
 * Sync requests run inline on the calling thread. Async requests are
 * either rejected immediately (the request comes back with its negative
 * result code set) or handed to the pool.
 */

pub mod event_loop;
pub mod pool;
pub mod syscalls;

pub use event_loop::EventLoop;
pub use pool::WorkerPool;

use crate::core::config::BridgeConfig;
use crate::core::errors::FsError;
use crate::fs::request::FsRequest;
use flume::Sender;
use tracing::debug;

/// Scheduling front of the native substrate
pub struct IoSubstrate {
    pool: WorkerPool,
}

impl IoSubstrate {
    pub fn start(config: &BridgeConfig, completions: Sender<Box<FsRequest>>) -> Result<Self, FsError> {
        Ok(Self {
            pool: WorkerPool::start(config, completions)?,
        })
    }

    /// Perform the request inline, blocking the caller
    pub fn execute(&self, req: &mut FsRequest) {
        syscalls::perform(req);
    }

    /// Schedule the request on the pool
    ///
    /// On immediate rejection the request is returned with its result set.
    pub fn schedule(&self, mut req: Box<FsRequest>) -> Result<(), Box<FsRequest>> {
        if let Some(code) = syscalls::precheck(req.op()) {
            debug!(
                request_id = req.id(),
                syscall = req.kind().name(),
                result = code,
                "Request rejected before scheduling"
            );
            req.set_result(code);
            return Err(req);
        }

        self.pool.submit(req);
        Ok(())
    }

    #[inline]
    pub fn pool_threads(&self) -> usize {
        self.pool.threads()
    }
}
