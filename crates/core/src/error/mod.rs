mod builder;
mod cocoa;
mod generic;
mod http;
mod status;
mod url_loading;

pub use builder::{
    CocoaErrorBuilder, ErrnoErrorBuilder, ErrorBuilder, GenericErrorBuilder, StatusErrorBuilder,
    UrlLoadingErrorBuilder,
};
pub use cocoa::{CocoaCode, CocoaError, COCOA_DOMAIN};
pub use generic::GenericError;
pub use http::{HttpError, HTTP_DOMAIN};
pub use status::{StatusCodeError, STATUS_DOMAIN};
pub use url_loading::{UrlErrorCode, UrlLoadingError, URL_DOMAIN};

use crate::codes::{self, CANCEL_CODES, FILE_NOT_FOUND_CODES, PERMISSION_CODES};
use crate::metadata::{keys, UserInfo};
use crate::posix::{PosixError, EACCES, ECANCELED, ENOENT, EPERM, POSIX_DOMAIN};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Domain reported for errors that carry no platform code
pub const OPAQUE_DOMAIN: &str = "Opaque";

/// Domain reported by extensions that do not name their own
pub const EXTENSION_DOMAIN: &str = "Extension";

/// Any error this library can classify
#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error(transparent)]
    Posix(#[from] PosixError),

    #[error(transparent)]
    Status(#[from] StatusCodeError),

    #[error(transparent)]
    Cocoa(#[from] CocoaError),

    #[error(transparent)]
    UrlLoading(#[from] UrlLoadingError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Generic(#[from] GenericError),

    /// Third-party error kinds that classify themselves
    #[error(transparent)]
    Extension(Arc<dyn Classify>),

    #[error(transparent)]
    Opaque(Arc<dyn std::error::Error + Send + Sync>),
}

impl From<io::Error> for PlatformError {
    fn from(err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => PlatformError::Posix(PosixError::new(code)),
            None => PlatformError::Opaque(Arc::new(err)),
        }
    }
}

impl PlatformError {
    /// Wrap a third-party error that classifies itself
    pub fn extension(err: impl Classify) -> Self {
        PlatformError::Extension(Arc::new(err))
    }

    /// The extension's concrete error, if it is a `T`
    pub fn downcast_ref<T: Classify>(&self) -> Option<&T> {
        match self {
            PlatformError::Extension(e) => {
                let err: &(dyn std::error::Error + 'static) = &**e;
                err.downcast_ref::<T>()
            }
            _ => None,
        }
    }

    /// Wrap an error that carries no platform code
    pub fn opaque(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        PlatformError::Opaque(Arc::new(err))
    }

    pub fn domain(&self) -> &str {
        match self {
            PlatformError::Posix(_) => POSIX_DOMAIN,
            PlatformError::Status(_) => STATUS_DOMAIN,
            PlatformError::Cocoa(_) => COCOA_DOMAIN,
            PlatformError::UrlLoading(_) => URL_DOMAIN,
            PlatformError::Http(_) => HTTP_DOMAIN,
            PlatformError::Generic(e) => e.domain(),
            PlatformError::Extension(e) => e.domain(),
            PlatformError::Opaque(_) => OPAQUE_DOMAIN,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            PlatformError::Posix(e) => i64::from(e.code()),
            PlatformError::Status(e) => i64::from(e.code()),
            PlatformError::Cocoa(e) => e.code().0,
            PlatformError::UrlLoading(e) => e.code().0,
            PlatformError::Http(e) => i64::from(e.status_code()),
            PlatformError::Generic(e) => e.code(),
            PlatformError::Extension(e) => e.code(),
            PlatformError::Opaque(_) => 0,
        }
    }

    /// Structured payload for this error
    pub fn user_info(&self) -> UserInfo {
        match self {
            PlatformError::Posix(_) => UserInfo::new(),
            PlatformError::Status(e) => e.user_info(),
            PlatformError::Cocoa(e) => e.user_info(),
            PlatformError::UrlLoading(e) => e.user_info(),
            PlatformError::Http(e) => e.user_info(),
            PlatformError::Generic(e) => e.user_info(),
            PlatformError::Extension(e) => e.user_info(),
            PlatformError::Opaque(e) => {
                let mut info = UserInfo::new();
                info.insert(keys::DESCRIPTION, e.to_string());
                info
            }
        }
    }

    pub fn underlying_error(&self) -> Option<&PlatformError> {
        match self {
            PlatformError::Status(e) => e.metadata().underlying(),
            PlatformError::Cocoa(e) => e.metadata().underlying(),
            PlatformError::UrlLoading(e) => e.metadata().underlying(),
            PlatformError::Generic(e) => e.metadata().underlying(),
            PlatformError::Extension(e) => e.underlying_error(),
            PlatformError::Posix(_) | PlatformError::Http(_) | PlatformError::Opaque(_) => None,
        }
    }

    /// POSIX code carried by this error, directly or through the status embedding
    pub fn to_errno(&self) -> Option<i32> {
        match self {
            PlatformError::Posix(e) => Some(e.code()),
            PlatformError::Status(e) => codes::embedded_posix_code(e.code()),
            PlatformError::Generic(e) if e.domain() == POSIX_DOMAIN => i32::try_from(e.code()).ok(),
            PlatformError::Generic(e) if e.domain() == STATUS_DOMAIN => {
                i32::try_from(e.code()).ok().and_then(codes::embedded_posix_code)
            }
            _ => None,
        }
    }

    /// Status code carried by this error
    pub fn to_status(&self) -> Option<i32> {
        match self {
            PlatformError::Status(e) => Some(e.code()),
            PlatformError::Generic(e) if e.domain() == STATUS_DOMAIN => i32::try_from(e.code()).ok(),
            _ => None,
        }
    }

    /// Class decided by the representation itself, before recursion
    fn own_class(&self) -> Option<ErrorClass> {
        match self {
            PlatformError::Cocoa(e) => e.code().class(),
            PlatformError::UrlLoading(e) => e.code().class(),
            PlatformError::Http(e) => e.class(),
            PlatformError::Generic(e) => e.class(),
            PlatformError::Posix(_)
            | PlatformError::Status(_)
            | PlatformError::Extension(_)
            | PlatformError::Opaque(_) => None,
        }
    }

    /// Check whether this error belongs to `class`.
    ///
    /// Tries the POSIX code, then the status code, then the representation's
    /// own codes, then the underlying error. Extensions answer for their whole
    /// chain, so their underlying error is not walked a second time.
    pub fn matches(&self, class: ErrorClass) -> bool {
        if let PlatformError::Extension(e) = self {
            return e.matches(class);
        }

        classify(
            class,
            self.to_errno(),
            self.to_status(),
            self.own_class(),
            self.underlying_error(),
        )
    }
}

/// Shared classification walk used by every representation
pub(crate) fn classify(
    class: ErrorClass,
    errno: Option<i32>,
    status: Option<i32>,
    own: Option<ErrorClass>,
    underlying: Option<&PlatformError>,
) -> bool {
    if errno.and_then(ErrorClass::from_posix) == Some(class) {
        return true;
    }
    if status.and_then(ErrorClass::from_status) == Some(class) {
        return true;
    }
    if own == Some(class) {
        return true;
    }
    underlying.is_some_and(|err| err.matches(class))
}

/// Semantic families shared by every error representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    FileNotFound,
    Permission,
    Cancelled,
}

impl ErrorClass {
    pub const ALL: [ErrorClass; 3] = [
        ErrorClass::FileNotFound,
        ErrorClass::Permission,
        ErrorClass::Cancelled,
    ];

    pub fn from_posix(code: i32) -> Option<Self> {
        match code {
            ENOENT => Some(ErrorClass::FileNotFound),
            EPERM | EACCES => Some(ErrorClass::Permission),
            ECANCELED => Some(ErrorClass::Cancelled),
            _ => None,
        }
    }

    pub fn from_status(status: i32) -> Option<Self> {
        if FILE_NOT_FOUND_CODES.contains(&status) {
            Some(ErrorClass::FileNotFound)
        } else if PERMISSION_CODES.contains(&status) {
            Some(ErrorClass::Permission)
        } else if CANCEL_CODES.contains(&status) {
            Some(ErrorClass::Cancelled)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorClass::FileNotFound => write!(f, "file_not_found"),
            ErrorClass::Permission => write!(f, "permission"),
            ErrorClass::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Semantic classification of an error.
///
/// Implemented by [`PlatformError`] and every concrete representation. Third-party
/// error kinds implement it to join classification through
/// [`PlatformError::extension`].
pub trait Classify: std::error::Error + Send + Sync + 'static {
    fn matches(&self, class: ErrorClass) -> bool;

    fn is_file_not_found_error(&self) -> bool {
        self.matches(ErrorClass::FileNotFound)
    }

    fn is_permission_error(&self) -> bool {
        self.matches(ErrorClass::Permission)
    }

    fn is_cancelled_error(&self) -> bool {
        self.matches(ErrorClass::Cancelled)
    }

    /// The error this one wraps, if any
    fn underlying_error(&self) -> Option<&PlatformError> {
        None
    }

    fn domain(&self) -> &str {
        EXTENSION_DOMAIN
    }

    fn code(&self) -> i64 {
        0
    }

    fn user_info(&self) -> UserInfo {
        let mut info = UserInfo::new();
        info.insert(keys::DESCRIPTION, self.to_string());
        info
    }
}

impl Classify for PlatformError {
    fn matches(&self, class: ErrorClass) -> bool {
        PlatformError::matches(self, class)
    }

    fn underlying_error(&self) -> Option<&PlatformError> {
        PlatformError::underlying_error(self)
    }

    fn domain(&self) -> &str {
        PlatformError::domain(self)
    }

    fn code(&self) -> i64 {
        PlatformError::code(self)
    }

    fn user_info(&self) -> UserInfo {
        PlatformError::user_info(self)
    }
}

impl Classify for PosixError {
    fn matches(&self, class: ErrorClass) -> bool {
        ErrorClass::from_posix(self.code()) == Some(class)
    }

    fn domain(&self) -> &str {
        POSIX_DOMAIN
    }

    fn code(&self) -> i64 {
        i64::from(PosixError::code(self))
    }

    fn user_info(&self) -> UserInfo {
        UserInfo::new()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ErrorMetadata;
    use crate::posix::EBADF;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct QuotaExceeded;

    impl fmt::Display for QuotaExceeded {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "quota exceeded")
        }
    }

    impl std::error::Error for QuotaExceeded {}

    impl Classify for QuotaExceeded {
        fn matches(&self, class: ErrorClass) -> bool {
            class == ErrorClass::Permission
        }

        fn domain(&self) -> &str {
            "com.example.quota"
        }

        fn code(&self) -> i64 {
            7
        }
    }

    #[test]
    fn test_posix_classification() {
        let not_found = PlatformError::from(PosixError::new(ENOENT));
        assert!(not_found.is_file_not_found_error());
        assert!(!not_found.is_permission_error());

        assert!(PlatformError::from(PosixError::new(EPERM)).is_permission_error());
        assert!(PlatformError::from(PosixError::new(EACCES)).is_permission_error());
        assert!(PlatformError::from(PosixError::new(ECANCELED)).is_cancelled_error());
    }

    #[test]
    fn test_status_classification() {
        for &code in FILE_NOT_FOUND_CODES {
            assert!(PlatformError::from(StatusCodeError::new(code)).is_file_not_found_error());
        }
        for &code in PERMISSION_CODES {
            assert!(PlatformError::from(StatusCodeError::new(code)).is_permission_error());
        }
        for &code in CANCEL_CODES {
            let err = PlatformError::from(StatusCodeError::new(code));
            assert!(err.is_cancelled_error());
            assert!(!err.is_file_not_found_error());
        }
        assert!(!PlatformError::from(StatusCodeError::new(codes::NO_ERR)).matches(ErrorClass::Cancelled));
    }

    #[test]
    fn test_embedded_status_classifies_as_posix() {
        let embedded = codes::embed_posix_code(ENOENT).unwrap();
        let err = PlatformError::from(StatusCodeError::new(embedded));

        assert_eq!(err.to_errno(), Some(ENOENT));
        assert!(err.is_file_not_found_error());
    }

    #[test]
    fn test_generic_domains() {
        let posix = PlatformError::from(GenericError::new(POSIX_DOMAIN, i64::from(EACCES)));
        assert_eq!(posix.to_errno(), Some(EACCES));
        assert!(posix.is_permission_error());

        let status = PlatformError::from(GenericError::new(STATUS_DOMAIN, i64::from(codes::FNF_ERR)));
        assert_eq!(status.to_status(), Some(codes::FNF_ERR));
        assert!(status.is_file_not_found_error());

        let cocoa = PlatformError::from(GenericError::new(COCOA_DOMAIN, CocoaCode::USER_CANCELLED.0));
        assert!(cocoa.is_cancelled_error());

        let url = PlatformError::from(GenericError::new(URL_DOMAIN, UrlErrorCode::FILE_DOES_NOT_EXIST.0));
        assert!(url.is_file_not_found_error());

        let other = PlatformError::from(GenericError::new("com.example", i64::from(ENOENT)));
        assert!(!other.is_file_not_found_error());
    }

    #[test]
    fn test_recursion_through_underlying() {
        let err = PlatformError::from(CocoaError::with_metadata(
            CocoaCode::FILE_READ_UNKNOWN,
            ErrorMetadata::builder()
                .underlying(PosixError::new(ECANCELED))
                .build(),
        ));

        assert!(err.is_cancelled_error());
        assert!(!err.is_permission_error());
        assert_eq!(err.underlying_error().map(PlatformError::code), Some(i64::from(ECANCELED)));
    }

    #[test]
    fn test_unknown_fallbacks_match_nothing() {
        for code in [CocoaCode::FILE_READ_UNKNOWN, CocoaCode::FILE_WRITE_UNKNOWN] {
            let err = PlatformError::from(CocoaError::new(code));
            for class in ErrorClass::ALL {
                assert!(!err.matches(class), "{code:?} matched {class}");
            }
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let os = PlatformError::from(io::Error::from_raw_os_error(ENOENT));
        assert!(matches!(os, PlatformError::Posix(_)));
        assert!(os.is_file_not_found_error());

        let custom = PlatformError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(custom, PlatformError::Opaque(_)));
        assert_eq!(custom.domain(), OPAQUE_DOMAIN);
        assert!(!custom.is_file_not_found_error());
        assert_eq!(custom.user_info().get_str(keys::DESCRIPTION), Some("gone"));
    }

    #[test]
    fn test_extension_point() {
        let err = PlatformError::extension(QuotaExceeded);

        assert!(err.is_permission_error());
        assert!(!err.is_cancelled_error());
        assert_eq!(err.domain(), "com.example.quota");
        assert_eq!(err.code(), 7);
        assert_eq!(err.to_string(), "quota exceeded");
        assert_eq!(err.user_info().get_str(keys::DESCRIPTION), Some("quota exceeded"));
    }

    #[derive(Debug)]
    struct Wrapped {
        inner: PlatformError,
        calls: Arc<AtomicUsize>,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "wrapped: {}", self.inner)
        }
    }

    impl std::error::Error for Wrapped {}

    impl Classify for Wrapped {
        fn matches(&self, class: ErrorClass) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.matches(class)
        }

        fn underlying_error(&self) -> Option<&PlatformError> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_nested_extensions_classify_once_per_level() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut err = PlatformError::from(PosixError::new(EBADF));
        for _ in 0..12 {
            err = PlatformError::extension(Wrapped {
                inner: err,
                calls: calls.clone(),
            });
        }

        assert!(!err.is_permission_error());
        assert_eq!(calls.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn test_downcast_extension() {
        let err = PlatformError::extension(QuotaExceeded);
        assert!(err.downcast_ref::<QuotaExceeded>().is_some());

        let wrapped = PlatformError::extension(Wrapped {
            inner: err,
            calls: Arc::new(AtomicUsize::new(0)),
        });
        assert!(wrapped.downcast_ref::<QuotaExceeded>().is_none());
        assert!(wrapped.downcast_ref::<Wrapped>().is_some());

        let plain = PlatformError::from(PosixError::new(ENOENT));
        assert!(plain.downcast_ref::<QuotaExceeded>().is_none());
    }

    #[test]
    fn test_error_class_serde() {
        assert_eq!(
            serde_json::to_string(&ErrorClass::FileNotFound).unwrap(),
            "\"file_not_found\""
        );
        assert_eq!(ErrorClass::Cancelled.to_string(), "cancelled");
    }
}
