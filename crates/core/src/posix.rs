//! POSIX `errno` vocabulary and the `PosixError` representation.

use std::fmt;
use std::io;

pub use libc::{
    E2BIG, EACCES, EAGAIN, EBADF, EBUSY, ECANCELED, EEXIST, EFBIG, EINTR, EINVAL, EIO, EISDIR,
    ENOENT, ENOSPC, ENOTDIR, EPERM, EROFS, ETXTBSY,
};

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "freebsd"
))]
pub use libc::EFTYPE;

/// Domain string used by structured errors carrying a POSIX code
pub const POSIX_DOMAIN: &str = "NSPOSIXErrorDomain";

/// A raw POSIX error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosixError {
    code: i32,
}

impl PosixError {
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    /// Capture the calling thread's current `errno`
    pub fn last() -> Self {
        Self::new(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// Operating-system text for this code
    pub fn description(&self) -> String {
        io::Error::from_raw_os_error(self.code).to_string()
    }
}

impl fmt::Display for PosixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for PosixError {}

impl From<PosixError> for io::Error {
    fn from(err: PosixError) -> Self {
        io::Error::from_raw_os_error(err.code)
    }
}
