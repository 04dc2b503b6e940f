/*!
 * Bridge Configuration
 *
 * Worker pool sizing and trace output, with environment overrides.
 */

use super::limits::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the event loop and its worker pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Number of blocking worker threads (default: 4)
    pub pool_threads: usize,

    /// Name given to worker threads
    pub thread_name: String,

    /// Emit JSON formatted traces
    pub trace_json: bool,
}

impl BridgeConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            pool_threads: DEFAULT_POOL_THREADS,
            thread_name: DEFAULT_POOL_THREAD_NAME.to_string(),
            trace_json: false,
        }
    }

    /// Build configuration from the environment
    ///
    /// Environment variables:
    /// - FS_BRIDGE_POOL_THREADS: worker pool size (1..=128)
    /// - FS_BRIDGE_THREAD_NAME: worker thread name
    /// - FS_BRIDGE_TRACE_JSON: `1` or `true` enables JSON traces
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(ENV_POOL_THREADS) {
            match raw.trim().parse::<usize>() {
                Ok(threads) => config = config.with_pool_threads(threads),
                Err(e) => warn!(
                    key = ENV_POOL_THREADS,
                    value = %raw,
                    error = %e,
                    "Ignoring invalid pool size"
                ),
            }
        }

        if let Some(name) = lookup(ENV_THREAD_NAME) {
            if !name.trim().is_empty() {
                config.thread_name = name.trim().to_string();
            }
        }

        if let Some(raw) = lookup(ENV_TRACE_JSON) {
            config.trace_json = matches!(raw.trim(), "1" | "true");
        }

        config
    }

    /// Set the pool size, clamped to `1..=MAX_POOL_THREADS`
    pub fn with_pool_threads(mut self, threads: usize) -> Self {
        let clamped = threads.clamp(1, MAX_POOL_THREADS);
        if clamped != threads {
            warn!(requested = threads, clamped = clamped, "Pool size out of range");
        }
        self.pool_threads = clamped;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
