/*!
 * fs-bridge - Demo Driver
 *
 * Runs the open/write/close/stat scenario against a path given on the
 * command line, once in sync mode and once through the event loop, then
 * prints the resulting stat record as JSON.
 */

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;
use tracing::{error, info};

use fs_bridge::{
    init_tracing, BridgeConfig, Callback, EventLoop, FsModule, HostBuffer, StatRecord, Value,
    O_CREAT, O_TRUNC, O_WRONLY,
};

const PAYLOAD: &[u8] = b"hello";

fn main() -> Result<(), Box<dyn Error>> {
    let config = BridgeConfig::from_env();
    init_tracing(&config);

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: fs-bridge <path>")?;

    info!(path = %path, pool_threads = config.pool_threads, "fs-bridge starting");

    let event_loop = Rc::new(EventLoop::new(config)?);
    let fs = Rc::new(FsModule::new(Rc::clone(&event_loop)));

    let record = run_sync(&fs, &path)?;
    info!(size = record.size, mode = record.mode, "Sync scenario complete");

    let slot = Rc::new(RefCell::new(None));
    run_async(&fs, &path, Rc::clone(&slot))?;
    let processed = event_loop.run();
    info!(completions = processed, "Async scenario complete");

    let record = slot.borrow_mut().take().ok_or("async scenario produced no stat")?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    let stats = event_loop.stats();
    info!(
        created = stats.created,
        released = stats.released,
        rejected_inline = stats.rejected_inline,
        "Request statistics"
    );

    Ok(())
}

fn run_sync(fs: &FsModule, path: &str) -> Result<StatRecord, Box<dyn Error>> {
    let fd = fs.open(&[
        Value::from(path),
        Value::from(O_CREAT | O_TRUNC | O_WRONLY),
        Value::from(0o644),
    ])?;

    let buffer = HostBuffer::from_bytes(PAYLOAD);
    let written = fs.write(&[
        fd.clone(),
        Value::from(buffer),
        Value::from(0),
        Value::from(PAYLOAD.len() as i32),
        Value::from(-1),
    ])?;
    info!(written = written.as_i32(), "Sync write");

    fs.close(&[fd])?;

    let stat = fs.stat(&[Value::from(path)])?;
    stat.as_stat().cloned().ok_or_else(|| "stat returned no record".into())
}

/// Chain open -> write -> close -> stat through callbacks
fn run_async(
    fs: &Rc<FsModule>,
    path: &str,
    slot: Rc<RefCell<Option<StatRecord>>>,
) -> Result<(), Box<dyn Error>> {
    let chain = Rc::clone(fs);
    let target = path.to_owned();

    let on_open = Callback::new(move |args: &[Value]| {
        let Some(fd) = completed("open", args).and_then(|v| v.as_i32()) else {
            return;
        };

        let fs = Rc::clone(&chain);
        let target = target.clone();
        let slot = Rc::clone(&slot);
        let on_write = Callback::new(move |args: &[Value]| {
            if completed("write", args).is_none() {
                return;
            }

            let fs_stat = Rc::clone(&fs);
            let target = target.clone();
            let slot = Rc::clone(&slot);
            let on_close = Callback::new(move |args: &[Value]| {
                if args.first().and_then(Value::as_error).is_some() {
                    completed("close", args);
                    return;
                }

                let slot = Rc::clone(&slot);
                let on_stat = Callback::new(move |args: &[Value]| {
                    if let Some(record) = completed("stat", args).and_then(|v| v.as_stat().cloned()) {
                        *slot.borrow_mut() = Some(record);
                    }
                });
                report(fs_stat.stat(&[Value::from(target.as_str()), Value::from(on_stat)]));
            });
            report(fs.close(&[Value::from(fd), Value::from(on_close)]));
        });

        let buffer = HostBuffer::from_bytes(PAYLOAD);
        report(chain.write(&[
            Value::from(fd),
            Value::from(buffer),
            Value::from(0),
            Value::from(PAYLOAD.len() as i32),
            Value::from(0),
            Value::from(on_write),
        ]));
    });

    fs.open(&[
        Value::from(path),
        Value::from(O_CREAT | O_TRUNC | O_WRONLY),
        Value::from(0o644),
        Value::from(on_open),
    ])?;
    Ok(())
}

/// Extract the payload of a `(null, payload)` callback, logging failures
fn completed(op: &str, args: &[Value]) -> Option<Value> {
    match args.first() {
        Some(Value::Error(err)) => {
            error!(op = op, error = %err, "Async operation failed");
            None
        }
        _ => Some(args.get(1).cloned().unwrap_or(Value::Undefined)),
    }
}

fn report(result: fs_bridge::Result<Value>) {
    if let Err(err) = result {
        error!(error = %err, "Dispatch failed");
    }
}
