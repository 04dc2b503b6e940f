/*!
 * Buffer Validator
 *
 * Bounds gate for every byte-level operation. A `BufferView` can only be
 * obtained through `BufferValidator::view`, so native I/O never sees a
 * region the host buffer does not cover.
 */

use crate::core::errors::FsError;
use crate::host::HostBuffer;
use std::fmt;

pub const OFFSET_OUT_OF_BOUND: &str = "offset out of bound";
pub const LENGTH_OUT_OF_BOUND: &str = "length out of bound";

/// Stateless range checker
pub struct BufferValidator;

impl BufferValidator {
    /// Check `(offset, length)` against `capacity`
    ///
    /// `offset == capacity` is rejected even when `length == 0`.
    pub fn check(capacity: usize, offset: i64, length: i64) -> Result<(), FsError> {
        if offset < 0 || offset as u64 >= capacity as u64 {
            return Err(FsError::range(OFFSET_OUT_OF_BOUND));
        }
        if length < 0 {
            return Err(FsError::range(LENGTH_OUT_OF_BOUND));
        }
        let end = (offset as u64).checked_add(length as u64);
        match end {
            Some(end) if end <= capacity as u64 => Ok(()),
            _ => Err(FsError::range(LENGTH_OUT_OF_BOUND)),
        }
    }

    /// Validate and borrow `length` bytes of `buffer` starting at `offset`
    pub fn view(buffer: &HostBuffer, offset: i64, length: i64) -> Result<BufferView, FsError> {
        Self::check(buffer.capacity(), offset, length)?;
        Ok(BufferView {
            buffer: buffer.clone(),
            offset: offset as usize,
            length: length as usize,
        })
    }
}

/// Validated window into a host buffer
///
/// Holds a handle to the host's storage for the duration of one call; it
/// never owns the bytes and is dropped with its request.
pub struct BufferView {
    buffer: HostBuffer,
    offset: usize,
    length: usize,
}

impl BufferView {
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Run `f` with the viewed bytes
    pub fn with_slice<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let (start, end) = (self.offset, self.offset + self.length);
        self.buffer.with_bytes(|bytes| f(&bytes[start..end]))
    }

    /// Run `f` with the viewed bytes, mutably
    pub fn with_slice_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let (start, end) = (self.offset, self.offset + self.length);
        self.buffer.with_bytes_mut(|bytes| f(&mut bytes[start..end]))
    }
}

impl fmt::Debug for BufferView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("offset", &self.offset)
            .field("length", &self.length)
            .field("capacity", &self.buffer.capacity())
            .finish()
    }
}
