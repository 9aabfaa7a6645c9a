//! Integration tests library for errbridge
//!
//! This crate contains shared helpers that drive real libc calls through the
//! call wrappers.

pub mod common;

// Re-export commonly used types for tests
pub use errbridge_calls::{
    call_posix, call_posix_ptr, call_status_api, call_status_api_optional, call_status_api_out,
    CallOptions, ErrnoSource, PosixExpectation,
};
pub use errbridge_core::{
    codes, keys, posix, Classify, CocoaCode, ErrorBuilder, ErrorClass, PlatformError,
    TranslationConfig, UserInfoValue,
};
pub use errbridge_recovery::{
    MakeRecoverable, RecoverableError, RecoverableErrorWrapper, RecoveryAttempter,
};
pub use std::sync::Arc;
pub use std::time::Duration;
