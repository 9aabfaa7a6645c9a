//! Common utilities for integration tests

use crate::*;
use errbridge_core::Result;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;
use tempfile::TempDir;

/// Create a scratch directory that is removed when dropped
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create scratch directory")
}

/// NUL-terminated form of `path` for libc calls
pub fn c_path(path: &Path) -> CString {
    CString::new(path.as_os_str().as_bytes()).expect("Path contains a NUL byte")
}

/// Call options pointing at `path`
pub fn options_for(path: &Path) -> CallOptions {
    CallOptions::new().with_path(path)
}

/// `open(2)` through the POSIX wrapper
pub fn open_fd(path: &Path, flags: libc::c_int, options: &CallOptions) -> Result<RawFd> {
    let c_path = c_path(path);

    // SAFETY: c_path outlives the call and is NUL-terminated
    call_posix(
        PosixExpectation::NonNegative,
        ErrnoSource::GlobalErrno,
        options,
        || unsafe { libc::open(c_path.as_ptr(), flags, 0o644 as libc::c_uint) },
    )
}

/// `close(2)` through the POSIX wrapper
pub fn close_fd(fd: RawFd, options: &CallOptions) -> Result<()> {
    // SAFETY: closing a descriptor has no memory-safety requirements
    call_posix(
        PosixExpectation::Zero,
        ErrnoSource::GlobalErrno,
        options,
        || unsafe { libc::close(fd) },
    )
    .map(|_| ())
}

/// True when running with superuser rights, which bypass permission checks
pub fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions
    unsafe { libc::geteuid() == 0 }
}

/// Structured code of `err`, if it is a structured error
pub fn cocoa_code(err: &PlatformError) -> Option<CocoaCode> {
    match err {
        PlatformError::Cocoa(e) => Some(e.code()),
        _ => None,
    }
}
