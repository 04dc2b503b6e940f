/*!
 * Host Buffer
 * Fixed-capacity byte buffer shared between the host and the worker pool
 */

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Host-owned byte buffer
///
/// The capacity is fixed at construction, so a range validated against
/// `capacity()` stays valid for the buffer's whole lifetime. Clones share
/// the same storage.
#[derive(Clone)]
pub struct HostBuffer {
    bytes: Arc<Mutex<Box<[u8]>>>,
    capacity: usize,
}

impl HostBuffer {
    /// Allocate a zero-filled buffer
    pub fn new(capacity: usize) -> Self {
        Self::from_bytes(vec![0u8; capacity])
    }

    /// Wrap existing bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into().into_boxed_slice();
        let capacity = bytes.len();
        Self {
            bytes: Arc::new(Mutex::new(bytes)),
            capacity,
        }
    }

    /// Buffer capacity in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the current contents
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.lock().to_vec()
    }

    /// Run `f` with shared access to the bytes
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let guard = self.bytes.lock();
        f(&guard)
    }

    /// Run `f` with exclusive access to the bytes
    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut guard = self.bytes.lock();
        f(&mut guard)
    }

    /// Check whether two handles share storage
    #[inline]
    pub fn ptr_eq(&self, other: &HostBuffer) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for HostBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBuffer")
            .field("capacity", &self.capacity)
            .finish()
    }
}
