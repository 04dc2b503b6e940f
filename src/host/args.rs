/*!
 * Argument Extraction
 * Typed access to the positional arguments of a host call
 */

use super::buffer::HostBuffer;
use super::callback::Callback;
use super::value::Value;
use crate::core::errors::FsError;

/// Positional arguments of one binding call
///
/// Every accessor fails with an argument error before any request is
/// created.
pub struct Arguments<'a> {
    method: &'static str,
    args: &'a [Value],
}

impl<'a> Arguments<'a> {
    pub fn new(method: &'static str, args: &'a [Value]) -> Self {
        Self { method, args }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Fail unless at least `count` arguments were passed
    pub fn require(&self, count: usize) -> Result<(), FsError> {
        if self.args.len() < count {
            return Err(FsError::argument(format!(
                "{} requires at least {} argument{}, got {}",
                self.method,
                count,
                if count == 1 { "" } else { "s" },
                self.args.len()
            )));
        }
        Ok(())
    }

    /// Number argument converted to int32
    pub fn int32(&self, index: usize, name: &str) -> Result<i32, FsError> {
        self.get(index)
            .and_then(Value::as_i32)
            .ok_or_else(|| self.mismatch(index, name, "a number"))
    }

    pub fn string(&self, index: usize, name: &str) -> Result<&'a str, FsError> {
        self.get(index)
            .and_then(Value::as_str)
            .ok_or_else(|| self.mismatch(index, name, "a string"))
    }

    pub fn buffer(&self, index: usize, name: &str) -> Result<&'a HostBuffer, FsError> {
        self.get(index)
            .and_then(Value::as_buffer)
            .ok_or_else(|| self.mismatch(index, name, "a Buffer"))
    }

    /// Trailing callback; anything that is not callable selects sync mode
    pub fn callback(&self, index: usize) -> Option<Callback> {
        self.get(index).and_then(Value::as_callback).cloned()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index)
    }

    fn mismatch(&self, index: usize, name: &str, expected: &str) -> FsError {
        let got = self.get(index).map_or("nothing", Value::type_name);
        FsError::argument(format!("{} must be {}, got {}", name, expected, got))
    }
}
