/*!
 * Host Callback
 * Callback invocation primitive supplied by the scripting engine
 */

use super::value::Value;
use std::fmt;
use std::rc::Rc;

/// Callable host function
///
/// Callbacks belong to the event-loop thread and are never sent to the
/// worker pool.
#[derive(Clone)]
pub struct Callback {
    func: Rc<dyn Fn(&[Value])>,
}

impl Callback {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) + 'static,
    {
        Self {
            func: Rc::new(func),
        }
    }

    /// Invoke the callback with `args`
    #[inline]
    pub fn call(&self, args: &[Value]) {
        (self.func)(args)
    }

    /// Check whether two handles refer to the same function
    #[inline]
    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}
