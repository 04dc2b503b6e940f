/*!
 * Worker Pool
 * Blocking thread pool that runs scheduled requests and posts completions
 */

use super::syscalls;
use crate::core::config::BridgeConfig;
use crate::core::errors::FsError;
use crate::core::limits::MAX_POOL_THREADS;
use crate::fs::request::FsRequest;
use flume::Sender;
use tokio::runtime::{Builder, Runtime};
use tracing::{info, trace, warn};

/// Fixed-size pool executing native requests off the event-loop thread
///
/// Completed requests are sent back over the completion channel; the pool
/// never runs completion logic itself.
pub struct WorkerPool {
    runtime: Runtime,
    completions: Sender<Box<FsRequest>>,
    threads: usize,
}

impl WorkerPool {
    /// Start the pool
    pub fn start(config: &BridgeConfig, completions: Sender<Box<FsRequest>>) -> Result<Self, FsError> {
        // Public fields can bypass `with_pool_threads`
        let threads = config.pool_threads.clamp(1, MAX_POOL_THREADS);
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(threads)
            .thread_name(config.thread_name.clone())
            .build()
            .map_err(|e| FsError::Runtime(format!("failed to start worker pool: {}", e)))?;

        info!(
            threads = threads,
            thread_name = %config.thread_name,
            "Worker pool started"
        );

        Ok(Self {
            runtime,
            completions,
            threads,
        })
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `req` on a pool thread and post it back when done
    pub fn submit(&self, mut req: Box<FsRequest>) {
        let completions = self.completions.clone();
        trace!(request_id = req.id(), syscall = req.kind().name(), "Submitting to pool");

        self.runtime.spawn_blocking(move || {
            syscalls::perform(&mut req);
            trace!(
                request_id = req.id(),
                result = req.result(),
                "Pool finished request"
            );
            if let Err(e) = completions.send(req) {
                warn!(
                    request_id = e.into_inner().id(),
                    "Event loop gone, dropping completed request"
                );
            }
        });
    }
}
