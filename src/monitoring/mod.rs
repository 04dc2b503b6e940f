/*!
 * Monitoring
 * Structured logging for the bridge and its request spans
 */

mod tracer;

pub use tracer::{init_tracing, span_request};
