/*!
 * Argument Validation Tests
 * Type, arity and bounds errors raised before any request exists
 */

use crate::support::{module, Recorder};
use fs_bridge::{FsError, HostBuffer, Value};
use pretty_assertions::assert_eq;

fn read_args(buffer: &HostBuffer, offset: i32, length: i32) -> Vec<Value> {
    vec![
        Value::from(0),
        Value::from(buffer.clone()),
        Value::from(offset),
        Value::from(length),
        Value::from(0),
    ]
}

#[test]
fn test_read_past_capacity_is_range_error() {
    let fs = module();
    let buffer = HostBuffer::new(4);

    let err = fs.read(&read_args(&buffer, 0, 10)).unwrap_err();
    assert_eq!(err, FsError::Range("length out of bound"));
    assert_eq!(err.to_string(), "RangeError: length out of bound");
    assert_eq!(fs.event_loop().stats().created, 0);
}

#[test]
fn test_offset_bounds() {
    let fs = module();
    let buffer = HostBuffer::new(4);

    let at_end = fs.write(&read_args(&buffer, 4, 0)).unwrap_err();
    assert_eq!(at_end, FsError::Range("offset out of bound"));

    let negative = fs.read(&read_args(&buffer, -1, 1)).unwrap_err();
    assert_eq!(negative, FsError::Range("offset out of bound"));

    let negative_length = fs.read(&read_args(&buffer, 0, -1)).unwrap_err();
    assert_eq!(negative_length, FsError::Range("length out of bound"));

    assert_eq!(fs.event_loop().stats().created, 0);
}

#[test]
fn test_validation_precedes_async_dispatch() {
    let fs = module();
    let buffer = HostBuffer::new(4);
    let recorder = Recorder::new();

    let mut args = read_args(&buffer, 2, 3);
    args.push(recorder.callback());

    assert!(fs.read(&args).unwrap_err().is_range());
    assert_eq!(fs.event_loop().run(), 0);
    assert_eq!(recorder.count(), 0);
    assert_eq!(fs.event_loop().stats().created, 0);
}

#[test]
fn test_argument_type_errors() {
    let fs = module();

    let err = fs
        .write(&[
            Value::from(1),
            Value::from("not a buffer"),
            Value::from(0),
            Value::from(1),
            Value::from(0),
        ])
        .unwrap_err();
    assert_eq!(err.to_string(), "TypeError: buffer must be a Buffer, got string");

    let err = fs.close(&[Value::from("3")]).unwrap_err();
    assert_eq!(err.to_string(), "TypeError: fd must be a number, got string");

    let err = fs
        .open(&[Value::from(1), Value::from(0), Value::from(0)])
        .unwrap_err();
    assert_eq!(err.to_string(), "TypeError: path must be a string, got number");
}

#[test]
fn test_arity_errors() {
    let fs = module();

    let err = fs.read(&[Value::from(0), Value::from(HostBuffer::new(1))]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "TypeError: read requires at least 5 arguments, got 2"
    );

    let err = fs.open(&[Value::from("f")]).unwrap_err();
    assert!(err.is_argument());

    let err = fs.stat(&[]).unwrap_err();
    assert_eq!(err.to_string(), "TypeError: path required");

    assert_eq!(fs.event_loop().stats().created, 0);
}
