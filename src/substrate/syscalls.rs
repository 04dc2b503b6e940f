/*!
 * Native Filesystem Calls
 *
 * Performs one request against the OS and stores a libuv-style result
 * code in it: the syscall's non-negative return value, or `-errno`.
 */

use crate::core::types::{Fd, ResultCode};
use crate::fs::request::{FsOp, FsRequest};
use crate::fs::stat::NativeStat;
use crate::fs::validator::BufferView;
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;

#[inline]
fn errno_code(errno: Errno) -> ResultCode {
    -(errno as i32 as ResultCode)
}

/// Argument checks the substrate applies before touching the OS
///
/// Returns the negative result code a request is rejected with.
pub fn precheck(op: &FsOp) -> Option<ResultCode> {
    match op {
        FsOp::Close { fd } | FsOp::Read { fd, .. } | FsOp::Write { fd, .. } if *fd < 0 => {
            Some(errno_code(Errno::EBADF))
        }
        FsOp::Open { path, .. } | FsOp::Stat { path } if path.contains('\0') => {
            Some(errno_code(Errno::EINVAL))
        }
        _ => None,
    }
}

/// Execute the request's syscall on the current thread
pub fn perform(req: &mut FsRequest) {
    if let Some(code) = precheck(req.op()) {
        req.set_result(code);
        return;
    }

    let (result, statbuf) = match req.op() {
        FsOp::Close { fd } => (close(*fd), None),
        FsOp::Open { path, flags, mode } => (open(path, *flags, *mode), None),
        FsOp::Read { fd, view, position } => (read(*fd, view, *position), None),
        FsOp::Write { fd, view, position } => (write(*fd, view, *position), None),
        FsOp::Stat { path } => match stat(path) {
            Ok(native) => (0, Some(native)),
            Err(code) => (code, None),
        },
    };

    req.set_result(result);
    if let Some(native) = statbuf {
        req.set_statbuf(native);
    }
}

fn close(fd: Fd) -> ResultCode {
    match nix::unistd::close(fd) {
        Ok(()) => 0,
        Err(errno) => errno_code(errno),
    }
}

fn open(path: &str, flags: i32, mode: i32) -> ResultCode {
    let oflag = OFlag::from_bits_truncate(flags) | OFlag::O_CLOEXEC;
    let mode = Mode::from_bits_truncate(mode as libc::mode_t);

    match nix::fcntl::open(path, oflag, mode) {
        Ok(fd) => fd as ResultCode,
        Err(errno) => errno_code(errno),
    }
}

fn read(fd: Fd, view: &BufferView, position: i64) -> ResultCode {
    view.with_slice_mut(|buf| {
        let ptr = buf.as_mut_ptr().cast::<libc::c_void>();
        let len = buf.len();
        // SAFETY: `buf` is the validated window of a fixed-capacity host
        // buffer, locked for the whole call, and `len` is its exact length.
        let n = unsafe {
            if position < 0 {
                libc::read(fd, ptr, len)
            } else {
                libc::pread(fd, ptr, len, position as libc::off_t)
            }
        };
        if n < 0 {
            errno_code(Errno::last())
        } else {
            n as ResultCode
        }
    })
}

fn write(fd: Fd, view: &BufferView, position: i64) -> ResultCode {
    view.with_slice(|buf| {
        let ptr = buf.as_ptr().cast::<libc::c_void>();
        let len = buf.len();
        // SAFETY: same window guarantees as `read`; the bytes are only read.
        let n = unsafe {
            if position < 0 {
                libc::write(fd, ptr, len)
            } else {
                libc::pwrite(fd, ptr, len, position as libc::off_t)
            }
        };
        if n < 0 {
            errno_code(Errno::last())
        } else {
            n as ResultCode
        }
    })
}

fn stat(path: &str) -> Result<NativeStat, ResultCode> {
    let st = nix::sys::stat::stat(path).map_err(errno_code)?;
    Ok(NativeStat {
        dev: st.st_dev as u64,
        mode: st.st_mode as u64,
        nlink: st.st_nlink as u64,
        uid: st.st_uid as u64,
        gid: st.st_gid as u64,
        rdev: st.st_rdev as u64,
        blksize: st.st_blksize as u64,
        ino: st.st_ino as u64,
        size: st.st_size as u64,
        blocks: st.st_blocks as u64,
    })
}
