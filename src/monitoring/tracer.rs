/*!
 * Tracing Setup
 * Subscriber installation and per-request spans using the tracing crate
 */

use crate::core::config::BridgeConfig;
use crate::core::types::ExecMode;
use tracing::{debug_span, field, info, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install the global subscriber
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - FS_BRIDGE_TRACE_JSON: Enable JSON output (or `trace_json` in config)
///
/// Returns false if a subscriber was already installed.
pub fn init_tracing(config: &BridgeConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.trace_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = config.trace_json, "Tracing initialized");
    }
    installed
}

/// Span covering one binding call
///
/// The `id` field is recorded once the request wrapper exists.
pub fn span_request(syscall: &'static str, mode: ExecMode) -> Span {
    debug_span!(
        "fs_request",
        id = field::Empty,
        syscall = syscall,
        mode = mode.as_str()
    )
}
