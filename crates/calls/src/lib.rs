//! Fallible-call wrappers for C-style APIs.
//!
//! Status-returning APIs go through [`call_status_api`] and friends; APIs that
//! report failure through `errno` or their return value go through
//! [`call_posix`] and friends. Both produce [`errbridge_core::PlatformError`]s.

pub mod options;
pub mod posix;
pub mod status;

pub use options::CallOptions;
pub use posix::{call_posix, call_posix_out, call_posix_ptr, ErrnoSource, PosixExpectation, PosixReturn};
pub use status::{call_status_api, call_status_api_optional, call_status_api_out};
