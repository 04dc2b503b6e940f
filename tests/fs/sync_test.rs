/*!
 * Sync Mode Tests
 * Inline execution, returned payloads and raised syscall errors
 */

use crate::support::{module, path_arg};
use fs_bridge::{BridgeConfig, EventLoop, FsModule, HostBuffer, Value};
use fs_bridge::{O_CREAT, O_RDONLY, O_RDWR, O_WRONLY};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::os::unix::fs::MetadataExt;
use std::rc::Rc;
use tempfile::tempdir;

#[test]
fn test_open_write_close_stat_scenario() {
    let fs = module();
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.txt");

    let fd = fs
        .open(&[path_arg(&path), Value::from(O_CREAT | O_WRONLY), Value::from(0o644)])
        .unwrap();
    assert!(fd.as_i32().unwrap() >= 0);

    let buffer = HostBuffer::from_bytes(b"hello".to_vec());
    let written = fs
        .write(&[
            fd.clone(),
            Value::from(buffer),
            Value::from(0),
            Value::from(5),
            Value::from(0),
        ])
        .unwrap();
    assert_eq!(written.as_i32(), Some(5));

    let closed = fs.close(&[fd]).unwrap();
    assert!(closed.is_undefined());

    let stat = fs.stat(&[path_arg(&path)]).unwrap();
    let record = stat.as_stat().unwrap();
    assert_eq!(record.size, 5.0);
    assert!(record.is_file());
}

#[test]
fn test_stat_matches_filesystem() {
    let fs = module();
    let dir = tempdir().unwrap();
    let path = dir.path().join("meta.bin");
    std::fs::write(&path, vec![0u8; 1234]).unwrap();

    let stat = fs.stat(&[path_arg(&path)]).unwrap();
    let record = stat.as_stat().unwrap();
    let meta = std::fs::metadata(&path).unwrap();

    assert_eq!(record.size, meta.len() as f64);
    assert_eq!(record.mode as u32, meta.mode());
    assert_eq!(record.ino, meta.ino() as f64);
    assert_eq!(record.nlink, 1);
}

#[test]
fn test_stat_directory() {
    let fs = module();
    let dir = tempdir().unwrap();

    let stat = fs.stat(&[path_arg(dir.path())]).unwrap();
    let record = stat.as_stat().unwrap();
    assert!(record.is_directory());
    assert!(!record.is_file());
}

#[test]
fn test_sync_failure_is_tagged_with_operation() {
    let fs = module();
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing").join("x");

    let err = fs
        .open(&[path_arg(&missing), Value::from(O_RDONLY), Value::from(0)])
        .unwrap_err();
    assert_eq!(err.syscall(), Some("open"));
    assert_eq!(err.to_string(), "ENOENT: no such file or directory, open");

    let err = fs.stat(&[path_arg(&missing)]).unwrap_err();
    assert_eq!(err.syscall(), Some("stat"));

    let buffer = HostBuffer::new(4);
    let err = fs
        .read(&[
            Value::from(-1),
            Value::from(buffer),
            Value::from(0),
            Value::from(4),
            Value::from(0),
        ])
        .unwrap_err();
    assert_eq!(err.syscall(), Some("read"));
    match err {
        fs_bridge::FsError::Syscall(e) => {
            assert_eq!(e.errno, "EBADF");
            assert_eq!(e.code, -libc::EBADF);
        }
        other => panic!("expected syscall error, got {:?}", other),
    }
}

#[test]
fn test_positioned_and_sequential_io() {
    let fs = module();
    let dir = tempdir().unwrap();
    let path = dir.path().join("io.txt");

    let fd = fs
        .open(&[path_arg(&path), Value::from(O_CREAT | O_RDWR), Value::from(0o600)])
        .unwrap();

    let data = HostBuffer::from_bytes(b"hello world".to_vec());
    let written = fs
        .write(&[
            fd.clone(),
            Value::from(data),
            Value::from(0),
            Value::from(11),
            Value::from(-1),
        ])
        .unwrap();
    assert_eq!(written.as_i32(), Some(11));

    // Positioned read into the middle of the buffer
    let target = HostBuffer::new(7);
    let read = fs
        .read(&[
            fd.clone(),
            Value::from(target.clone()),
            Value::from(1),
            Value::from(5),
            Value::from(6),
        ])
        .unwrap();
    assert_eq!(read.as_i32(), Some(5));
    assert_eq!(target.to_vec(), b"\0world\0".to_vec());

    // Current position is at end of file after the sequential write
    let read = fs
        .read(&[
            fd.clone(),
            Value::from(target),
            Value::from(0),
            Value::from(7),
            Value::from(-1),
        ])
        .unwrap();
    assert_eq!(read.as_i32(), Some(0));

    fs.close(&[fd]).unwrap();
}

#[test]
fn test_fractional_descriptor_truncates() {
    let fs = module();
    let dir = tempdir().unwrap();
    let path = dir.path().join("trunc.txt");

    let fd = fs
        .open(&[path_arg(&path), Value::from(O_CREAT | O_WRONLY), Value::from(0o644)])
        .unwrap()
        .as_i32()
        .unwrap();

    let closed = fs.close(&[Value::from(fd as f64 + 0.75)]).unwrap();
    assert!(closed.is_undefined());
}

#[test]
fn test_every_sync_call_releases_its_request() {
    let fs = module();
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    for _ in 0..5 {
        fs.stat(&[path_arg(dir.path())]).unwrap();
        fs.stat(&[path_arg(&missing)]).unwrap_err();
    }

    let stats = fs.event_loop().stats();
    assert_eq!(stats.created, 10);
    assert_eq!(stats.released, 10);
    assert_eq!(stats.dispatched_async, 0);
    assert_eq!(fs.event_loop().pending(), 0);
}

#[test]
#[serial]
fn test_loop_from_environment() {
    std::env::set_var("FS_BRIDGE_POOL_THREADS", "3");
    let config = BridgeConfig::from_env();
    std::env::remove_var("FS_BRIDGE_POOL_THREADS");
    assert_eq!(config.pool_threads, 3);

    let fs = FsModule::new(Rc::new(EventLoop::new(config).unwrap()));
    let stat = fs.stat(&[Value::from(".")]).unwrap();
    assert!(stat.as_stat().unwrap().is_directory());
}
