use crate::options::CallOptions;
use errbridge_core::{errno_error, PlatformError, PosixError, Result};
use std::ptr::NonNull;
use tracing::debug;

/// Which return values count as success for a POSIX-style call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosixExpectation {
    /// Exactly zero
    Zero,
    /// Zero or any positive value
    NonNegative,
    /// Exactly this value
    Specific(i64),
    /// Anything but this value
    NotSpecific(i64),
}

impl PosixExpectation {
    pub fn is_success(self, ret: i64) -> bool {
        match self {
            PosixExpectation::Zero => ret == 0,
            PosixExpectation::NonNegative => ret >= 0,
            PosixExpectation::Specific(expected) => ret == expected,
            PosixExpectation::NotSpecific(failure) => ret != failure,
        }
    }
}

/// Where the error code of a failed call comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrnoSource {
    /// The thread's `errno`, read right after the call
    #[default]
    GlobalErrno,
    /// The call returns the error code itself
    ReturnValue,
}

/// Signed integer return types of POSIX-style calls
pub trait PosixReturn: Copy {
    fn as_i64(self) -> i64;
}

impl PosixReturn for i8 {
    fn as_i64(self) -> i64 {
        i64::from(self)
    }
}

impl PosixReturn for i16 {
    fn as_i64(self) -> i64 {
        i64::from(self)
    }
}

impl PosixReturn for i32 {
    fn as_i64(self) -> i64 {
        i64::from(self)
    }
}

impl PosixReturn for i64 {
    fn as_i64(self) -> i64 {
        self
    }
}

impl PosixReturn for isize {
    fn as_i64(self) -> i64 {
        self as i64
    }
}

fn posix_failure(options: &CallOptions, code: i32) -> PlatformError {
    debug!(
        errno = code,
        is_write = options.is_write(),
        location = options.location().map(ToString::to_string),
        "POSIX call failed"
    );

    errno_error(
        code,
        options.location().cloned(),
        options.is_write(),
        options.config(),
    )
}

fn failure_code(source: ErrnoSource, ret: i64) -> i32 {
    match source {
        ErrnoSource::GlobalErrno => PosixError::last().code(),
        // Out-of-range codes fall through to the unknown error
        ErrnoSource::ReturnValue => i32::try_from(ret).unwrap_or(0),
    }
}

/// Call a POSIX-style function and check its return value.
///
/// Returns the raw return value on success.
pub fn call_posix<R, F>(
    expect: PosixExpectation,
    source: ErrnoSource,
    options: &CallOptions,
    call: F,
) -> Result<R>
where
    R: PosixReturn,
    F: FnOnce() -> R,
{
    let ret = call();
    if expect.is_success(ret.as_i64()) {
        return Ok(ret);
    }

    let code = failure_code(source, ret.as_i64());
    Err(posix_failure(options, code))
}

/// Call a POSIX-style function that fills in an out-parameter
pub fn call_posix_out<T, R, F>(
    expect: PosixExpectation,
    source: ErrnoSource,
    options: &CallOptions,
    call: F,
) -> Result<T>
where
    T: Default,
    R: PosixReturn,
    F: FnOnce(&mut T) -> R,
{
    let mut value = T::default();
    let ret = call(&mut value);
    if expect.is_success(ret.as_i64()) {
        return Ok(value);
    }

    let code = failure_code(source, ret.as_i64());
    Err(posix_failure(options, code))
}

/// Call a function that returns a null pointer and sets `errno` on failure
pub fn call_posix_ptr<T, F>(options: &CallOptions, call: F) -> Result<NonNull<T>>
where
    F: FnOnce() -> *mut T,
{
    let ptr = call();
    match NonNull::new(ptr) {
        Some(ptr) => Ok(ptr),
        None => {
            let code = PosixError::last().code();
            Err(posix_failure(options, code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errbridge_core::{keys, Classify, CocoaCode, TranslationConfig};

    #[test]
    fn test_expectations() {
        assert!(PosixExpectation::Zero.is_success(0));
        assert!(!PosixExpectation::Zero.is_success(1));
        assert!(!PosixExpectation::Zero.is_success(-1));

        assert!(PosixExpectation::NonNegative.is_success(0));
        assert!(PosixExpectation::NonNegative.is_success(12));
        assert!(!PosixExpectation::NonNegative.is_success(-1));

        assert!(PosixExpectation::Specific(5).is_success(5));
        assert!(!PosixExpectation::Specific(5).is_success(0));

        assert!(PosixExpectation::NotSpecific(-1).is_success(0));
        assert!(PosixExpectation::NotSpecific(-1).is_success(-2));
        assert!(!PosixExpectation::NotSpecific(-1).is_success(-1));
    }

    #[test]
    fn test_success_returns_value() {
        let options = CallOptions::new();

        let ret = call_posix(PosixExpectation::NonNegative, ErrnoSource::default(), &options, || 3_i32)
            .unwrap();
        assert_eq!(ret, 3);

        let ret = call_posix(PosixExpectation::Specific(5), ErrnoSource::default(), &options, || 5_isize)
            .unwrap();
        assert_eq!(ret, 5);
    }

    #[test]
    fn test_global_errno() {
        let options = CallOptions::new().with_path("/dev/null");

        // SAFETY: closing an invalid descriptor only sets errno
        let err = call_posix(PosixExpectation::Zero, ErrnoSource::GlobalErrno, &options, || unsafe {
            libc::close(-1)
        })
        .unwrap_err();

        assert!(matches!(err, PlatformError::Posix(e) if e.code() == libc::EBADF));
    }

    #[test]
    fn test_return_value_source() {
        let options = CallOptions::new().with_path("/tmp/missing.txt");

        let err = call_posix(PosixExpectation::Zero, ErrnoSource::ReturnValue, &options, || {
            libc::ENOENT
        })
        .unwrap_err();

        assert!(err.is_file_not_found_error());
        assert!(matches!(
            &err,
            PlatformError::Cocoa(e) if e.code() == CocoaCode::FILE_READ_NO_SUCH_FILE
        ));
        assert_eq!(err.user_info().get_str(keys::FILE_PATH), Some("/tmp/missing.txt"));
    }

    #[test]
    fn test_write_context() {
        let options = CallOptions::new().with_path("/etc/hosts").with_write(true);

        let err = call_posix(PosixExpectation::Zero, ErrnoSource::ReturnValue, &options, || {
            libc::EACCES as i64
        })
        .unwrap_err();

        assert!(matches!(
            &err,
            PlatformError::Cocoa(e) if e.code() == CocoaCode::FILE_WRITE_NO_PERMISSION
        ));
    }

    #[test]
    fn test_out_parameter() {
        let options = CallOptions::new();

        let value = call_posix_out(PosixExpectation::Zero, ErrnoSource::ReturnValue, &options, |out: &mut u64| {
            *out = 99;
            0_i32
        })
        .unwrap();
        assert_eq!(value, 99);

        let err = call_posix_out(PosixExpectation::Zero, ErrnoSource::ReturnValue, &options, |_: &mut u64| {
            libc::ECANCELED
        })
        .unwrap_err();
        assert!(err.is_cancelled_error());
    }

    #[test]
    fn test_legacy_config() {
        let options =
            CallOptions::new().with_config(TranslationConfig::new().with_platform_version(10));

        let err = call_posix(PosixExpectation::Zero, ErrnoSource::ReturnValue, &options, || {
            libc::EBADF
        })
        .unwrap_err();

        assert!(matches!(err, PlatformError::Generic(_)));
        assert_eq!(err.to_errno(), Some(libc::EBADF));
    }

    #[test]
    fn test_null_pointer() {
        let options = CallOptions::new().with_path("/nonexistent/dir");

        let mut slot = 7_u8;
        let ptr = call_posix_ptr(&options, || &mut slot as *mut u8).unwrap();
        assert_eq!(unsafe { *ptr.as_ptr() }, 7);

        // SAFETY: the path is NUL-terminated and opendir only reads it
        let err = call_posix_ptr(&options, || unsafe {
            libc::opendir(b"/nonexistent/dir\0".as_ptr().cast())
        })
        .unwrap_err();

        assert!(err.is_file_not_found_error());
    }
}
