/*!
 * Filesystem Binding
 *
 * Host-facing `fs` module and the request machinery behind it:
 * - dispatcher: argument handling and sync/async selection
 * - request: request wrappers and their release accounting
 * - completion: result construction shared by both modes
 * - validator: buffer window checks
 * - stat / errors: result marshaling
 */

pub mod completion;
pub mod dispatcher;
pub mod errors;
pub mod request;
pub mod stat;
pub mod validator;

pub use completion::{CompletionHandler, OperationResult, Payload};
pub use dispatcher::FsModule;
pub use errors::{ErrorTranslator, SyscallError};
pub use request::{FsKind, FsOp, FsRequest, ReqWrap, RequestStatistics, RequestStats};
pub use stat::{NativeStat, StatMarshaler, StatRecord};
pub use validator::{BufferValidator, BufferView};
