/*!
 * Async Mode Tests
 * Callback delivery through the event loop
 */

use crate::support::{module, path_arg, Recorder};
use fs_bridge::{Callback, FsModule, HostBuffer, StatRecord, Value};
use fs_bridge::{O_CREAT, O_RDONLY, O_WRONLY};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::tempdir;

#[test]
fn test_open_missing_calls_back_once_with_error() {
    let fs = module();
    let recorder = Recorder::new();

    let returned = fs
        .open(&[
            Value::from("missing/x"),
            Value::from(O_RDONLY),
            Value::from(0),
            recorder.callback(),
        ])
        .unwrap();
    assert!(returned.is_undefined());

    fs.event_loop().run();

    assert_eq!(recorder.count(), 1);
    let args = recorder.call(0);
    assert_eq!(args.len(), 1);
    let err = args[0].as_error().unwrap();
    assert_eq!(err.syscall(), Some("open"));
}

#[test]
fn test_stat_delivers_null_and_record() {
    let fs = module();
    let dir = tempdir().unwrap();
    let path = dir.path().join("five.txt");
    std::fs::write(&path, b"12345").unwrap();

    let recorder = Recorder::new();
    fs.stat(&[path_arg(&path), recorder.callback()]).unwrap();
    assert_eq!(fs.event_loop().pending(), 1);

    assert_eq!(fs.event_loop().run(), 1);
    let args = recorder.call(0);
    assert_eq!(args.len(), 2);
    assert!(args[0].is_null());
    assert_eq!(args[1].as_stat().unwrap().size, 5.0);
}

#[test]
fn test_close_delivers_null_only() {
    let fs = module();
    let dir = tempdir().unwrap();
    let path = dir.path().join("c.txt");

    let fd = fs
        .open(&[path_arg(&path), Value::from(O_CREAT | O_WRONLY), Value::from(0o644)])
        .unwrap();

    let recorder = Recorder::new();
    fs.close(&[fd, recorder.callback()]).unwrap();
    fs.event_loop().run();

    let args = recorder.call(0);
    assert_eq!(args.len(), 1);
    assert!(args[0].is_null());
}

#[test]
fn test_nested_callbacks_chain_operations() {
    let fs = Rc::new(module());
    let dir = tempdir().unwrap();
    let path = dir.path().join("chain.txt").to_string_lossy().into_owned();
    let result: Rc<RefCell<Option<StatRecord>>> = Rc::new(RefCell::new(None));

    let on_open = {
        let fs = Rc::clone(&fs);
        let path = path.clone();
        let result = Rc::clone(&result);
        Callback::new(move |args: &[Value]| {
            assert!(args[0].is_null());
            let fd = args[1].as_i32().unwrap();

            let fs_inner = Rc::clone(&fs);
            let path = path.clone();
            let result = Rc::clone(&result);
            let on_write = Callback::new(move |args: &[Value]| {
                assert_eq!(args[1].as_i32(), Some(5));

                let fs_stat = Rc::clone(&fs_inner);
                let path = path.clone();
                let result = Rc::clone(&result);
                let on_close = Callback::new(move |args: &[Value]| {
                    assert_eq!(args.len(), 1);

                    let result = Rc::clone(&result);
                    let on_stat = Callback::new(move |args: &[Value]| {
                        *result.borrow_mut() = args[1].as_stat().cloned();
                    });
                    fs_stat
                        .stat(&[Value::from(path.as_str()), Value::from(on_stat)])
                        .unwrap();
                });
                fs_inner
                    .close(&[Value::from(fd), Value::from(on_close)])
                    .unwrap();
            });

            fs.write(&[
                Value::from(fd),
                Value::from(HostBuffer::from_bytes(b"hello".to_vec())),
                Value::from(0),
                Value::from(5),
                Value::from(0),
                Value::from(on_write),
            ])
            .unwrap();
        })
    };

    fs.open(&[
        Value::from(path.as_str()),
        Value::from(O_CREAT | O_WRONLY),
        Value::from(0o644),
        Value::from(on_open),
    ])
    .unwrap();

    assert_eq!(fs.event_loop().run(), 4);

    let record = result.borrow().clone().unwrap();
    assert_eq!(record.size, 5.0);

    let stats = fs.event_loop().stats();
    assert_eq!(stats.created, 4);
    assert_eq!(stats.released, 4);
    assert_eq!(stats.completed_async, 4);
}

#[test]
fn test_async_read_fills_buffer() {
    let fs = module();
    let dir = tempdir().unwrap();
    let path = dir.path().join("r.txt");
    std::fs::write(&path, b"abcdef").unwrap();

    let fd = fs
        .open(&[path_arg(&path), Value::from(O_RDONLY), Value::from(0)])
        .unwrap();
    let buffer = HostBuffer::new(4);
    let recorder = Recorder::new();

    fs.read(&[
        fd.clone(),
        Value::from(buffer.clone()),
        Value::from(0),
        Value::from(4),
        Value::from(2),
        recorder.callback(),
    ])
    .unwrap();
    fs.event_loop().run();

    assert_eq!(recorder.call(0)[1].as_i32(), Some(4));
    assert_eq!(buffer.to_vec(), b"cdef".to_vec());
    fs.close(&[fd]).unwrap();
}

#[test]
fn test_each_call_gets_exactly_one_callback() {
    let fs = module();
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let recorder = Recorder::new();

    for i in 0..20 {
        let target = if i % 2 == 0 { dir.path() } else { missing.as_path() };
        fs.stat(&[path_arg(target), recorder.callback()]).unwrap();
    }

    assert_eq!(fs.event_loop().run(), 20);
    assert_eq!(recorder.count(), 20);

    let failures = (0..20)
        .filter(|i| recorder.call(*i)[0].as_error().is_some())
        .count();
    assert_eq!(failures, 10);

    let stats = fs.event_loop().stats();
    assert_eq!(stats.dispatched_async, 20);
    assert_eq!(stats.completed_async, 20);
    assert_eq!(stats.in_flight(), 0);
}

#[test]
fn test_immediate_rejection_is_delivered_inline() {
    let fs = module();
    let recorder = Recorder::new();

    fs.close(&[Value::from(-1), recorder.callback()]).unwrap();

    // Delivered before close() returned, without running the loop
    assert_eq!(recorder.count(), 1);
    let args = recorder.call(0);
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].as_error().and_then(|e| e.syscall()), Some("close"));

    let stats = fs.event_loop().stats();
    assert_eq!(stats.rejected_inline, 1);
    assert_eq!(stats.created, stats.released);
    assert_eq!(fs.event_loop().run(), 0);
}

#[test]
fn test_run_once_polls_without_blocking() {
    let fs: FsModule = module();
    let recorder = Recorder::new();

    fs.stat(&[Value::from("."), recorder.callback()]).unwrap();
    while fs.event_loop().pending() > 0 {
        if !fs.event_loop().run_once() {
            std::thread::yield_now();
        }
    }

    assert_eq!(recorder.count(), 1);
    assert!(!fs.event_loop().run_once());
}
