/*!
 * Filesystem Dispatcher
 *
 * Host-facing `fs` module. Each method validates its arguments, builds the
 * native operation and then either runs it inline (sync) or hands it to
 * the event loop (async, when a callable trailing argument is present).
 */

use super::completion::CompletionHandler;
use super::request::{FsOp, ReqWrap};
use super::validator::BufferValidator;
use crate::core::errors::FsError;
use crate::core::types::ExecMode;
use crate::host::{Arguments, Callback, Value};
use crate::monitoring::span_request;
use crate::substrate::EventLoop;
use std::rc::Rc;

/// The `fs` binding bound to one event loop
pub struct FsModule {
    event_loop: Rc<EventLoop>,
}

impl FsModule {
    /// Method table exposed to the host
    pub const METHODS: [&'static str; 5] = ["close", "open", "read", "write", "stat"];

    pub fn new(event_loop: Rc<EventLoop>) -> Self {
        Self { event_loop }
    }

    #[inline]
    pub fn event_loop(&self) -> &Rc<EventLoop> {
        &self.event_loop
    }

    /// Invoke a method by name
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, FsError> {
        match name {
            "close" => self.close(args),
            "open" => self.open(args),
            "read" => self.read(args),
            "write" => self.write(args),
            "stat" => self.stat(args),
            other => Err(FsError::argument(format!("fs has no method named '{}'", other))),
        }
    }

    /// `close(fd, [cb])`
    pub fn close(&self, args: &[Value]) -> Result<Value, FsError> {
        let args = Arguments::new("close", args);
        args.require(1)?;
        let fd = args.int32(0, "fd")?;

        self.submit(FsOp::Close { fd }, args.callback(1))
    }

    /// `open(path, flags, mode, [cb])`
    pub fn open(&self, args: &[Value]) -> Result<Value, FsError> {
        let args = Arguments::new("open", args);
        args.require(3)?;
        let path = args.string(0, "path")?;
        let flags = args.int32(1, "flags")?;
        let mode = args.int32(2, "mode")?;

        let op = FsOp::Open {
            path: path.to_owned(),
            flags,
            mode,
        };
        self.submit(op, args.callback(3))
    }

    /// `read(fd, buffer, offset, length, position, [cb])`
    pub fn read(&self, args: &[Value]) -> Result<Value, FsError> {
        let args = Arguments::new("read", args);
        args.require(5)?;
        let fd = args.int32(0, "fd")?;
        let buffer = args.buffer(1, "buffer")?;
        let offset = args.int32(2, "offset")?;
        let length = args.int32(3, "length")?;
        let position = args.int32(4, "position")?;

        let view = BufferValidator::view(buffer, offset.into(), length.into())?;
        let op = FsOp::Read {
            fd,
            view,
            position: position.into(),
        };
        self.submit(op, args.callback(5))
    }

    /// `write(fd, buffer, offset, length, position, [cb])`
    pub fn write(&self, args: &[Value]) -> Result<Value, FsError> {
        let args = Arguments::new("write", args);
        args.require(5)?;
        let fd = args.int32(0, "fd")?;
        let buffer = args.buffer(1, "buffer")?;
        let offset = args.int32(2, "offset")?;
        let length = args.int32(3, "length")?;
        let position = args.int32(4, "position")?;

        let view = BufferValidator::view(buffer, offset.into(), length.into())?;
        let op = FsOp::Write {
            fd,
            view,
            position: position.into(),
        };
        self.submit(op, args.callback(5))
    }

    /// `stat(path, [cb])`
    pub fn stat(&self, args: &[Value]) -> Result<Value, FsError> {
        let args = Arguments::new("stat", args);
        if args.is_empty() {
            return Err(FsError::argument("path required"));
        }
        let path = args.string(0, "path")?;

        let op = FsOp::Stat {
            path: path.to_owned(),
        };
        self.submit(op, args.callback(1))
    }

    fn submit(&self, op: FsOp, callback: Option<Callback>) -> Result<Value, FsError> {
        let mode = if callback.is_some() {
            ExecMode::Async
        } else {
            ExecMode::Sync
        };
        let span = span_request(op.kind().name(), mode);
        let _entered = span.enter();

        let stats = self.event_loop.request_stats();
        match callback {
            Some(callback) => {
                let wrap = ReqWrap::create(op, Some(callback), stats);
                span.record("id", wrap.id());
                self.event_loop.dispatch(wrap);
                Ok(Value::Undefined)
            }
            None => {
                let mut wrap = ReqWrap::create(op, None, stats);
                span.record("id", wrap.id());
                self.event_loop.execute(&mut wrap);
                CompletionHandler::into_return(CompletionHandler::complete(wrap.request()))
            }
        }
    }
}
