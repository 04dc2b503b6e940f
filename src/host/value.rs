/*!
 * Host Values
 * The subset of the scripting engine's value model the bridge consumes and produces
 */

use super::buffer::HostBuffer;
use super::callback::Callback;
use crate::core::errors::FsError;
use crate::fs::stat::StatRecord;

/// Dynamically typed host value
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Buffer(HostBuffer),
    Function(Callback),
    Stat(StatRecord),
    Error(FsError),
}

impl Value {
    /// Type name used in argument error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Buffer(_) => "Buffer",
            Value::Function(_) => "function",
            Value::Stat(_) => "Stats",
            Value::Error(_) => "Error",
        }
    }

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub const fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Number converted with host int32 semantics
    pub fn as_i32(&self) -> Option<i32> {
        self.as_number().map(to_int32)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&HostBuffer> {
        match self {
            Value::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Value::Function(cb) => Some(cb),
            _ => None,
        }
    }

    pub fn as_stat(&self) -> Option<&StatRecord> {
        match self {
            Value::Stat(stat) => Some(stat),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&FsError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// ECMAScript ToInt32: truncate, wrap modulo 2^32, reinterpret as signed
pub fn to_int32(number: f64) -> i32 {
    if !number.is_finite() {
        return 0;
    }
    let wrapped = number.trunc().rem_euclid(4_294_967_296.0);
    wrapped as u32 as i32
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<HostBuffer> for Value {
    fn from(b: HostBuffer) -> Self {
        Value::Buffer(b)
    }
}

impl From<Callback> for Value {
    fn from(cb: Callback) -> Self {
        Value::Function(cb)
    }
}

impl From<StatRecord> for Value {
    fn from(stat: StatRecord) -> Self {
        Value::Stat(stat)
    }
}

impl From<FsError> for Value {
    fn from(err: FsError) -> Self {
        Value::Error(err)
    }
}
