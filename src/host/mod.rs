/*!
 * Host Contract
 *
 * What the bridge consumes from the scripting engine:
 * - Value: dynamically typed arguments and results
 * - HostBuffer: byte storage exposing base and capacity
 * - Callback: the function invocation primitive
 */

pub mod args;
pub mod buffer;
pub mod callback;
pub mod value;

pub use args::Arguments;
pub use buffer::HostBuffer;
pub use callback::Callback;
pub use value::{to_int32, Value};
