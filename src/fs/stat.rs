/*!
 * Stat Marshaler
 * Pure conversion from the substrate's stat buffer to the host record
 */

use serde::{Deserialize, Serialize};

/// Widened copy of the OS stat structure, filled by the substrate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeStat {
    pub dev: u64,
    pub mode: u64,
    pub nlink: u64,
    pub uid: u64,
    pub gid: u64,
    pub rdev: u64,
    pub blksize: u64,
    pub ino: u64,
    pub size: u64,
    pub blocks: u64,
}

/// Host-visible file status record
///
/// Identifier-like fields are 32-bit integers; sizes and counts are
/// carried as `f64` so large values are not truncated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub dev: i32,
    pub mode: i32,
    pub nlink: i32,
    pub uid: i32,
    pub gid: i32,
    pub rdev: i32,
    pub blksize: f64,
    pub ino: f64,
    pub size: f64,
    pub blocks: f64,
}

const S_IFMT: i32 = 0o170000;
const S_IFREG: i32 = 0o100000;
const S_IFDIR: i32 = 0o040000;
const S_IFLNK: i32 = 0o120000;

impl StatRecord {
    #[inline]
    pub fn is_file(&self) -> bool {
        self.mode & S_IFMT == S_IFREG
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        self.mode & S_IFMT == S_IFDIR
    }

    #[inline]
    pub fn is_symbolic_link(&self) -> bool {
        self.mode & S_IFMT == S_IFLNK
    }

    /// Permission bits only
    #[inline]
    pub fn permissions(&self) -> i32 {
        self.mode & 0o7777
    }
}

/// Stateless stat conversion
pub struct StatMarshaler;

impl StatMarshaler {
    pub fn marshal(stat: &NativeStat) -> StatRecord {
        StatRecord {
            dev: stat.dev as i32,
            mode: stat.mode as i32,
            nlink: stat.nlink as i32,
            uid: stat.uid as i32,
            gid: stat.gid as i32,
            rdev: stat.rdev as i32,
            blksize: stat.blksize as f64,
            ino: stat.ino as f64,
            size: stat.size as f64,
            blocks: stat.blocks as f64,
        }
    }
}
