//! Constructors turning raw status and errno codes into [`PlatformError`]s.

use crate::codes;
use crate::config::TranslationConfig;
use crate::error::{Classify, CocoaCode, CocoaError, GenericError, PlatformError, StatusCodeError};
use crate::metadata::{ErrorMetadata, Location};
use crate::posix::{
    PosixError, EACCES, ECANCELED, EEXIST, EFBIG, ENOENT, ENOSPC, EPERM, EROFS, POSIX_DOMAIN,
};
use tracing::{debug, trace};

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "tvos",
    target_os = "watchos",
    target_os = "freebsd"
))]
use crate::posix::EFTYPE;

/// Structured code that best describes a POSIX failure in a read or write context
pub fn cocoa_code_for_posix(code: i32, is_write: bool) -> Option<CocoaCode> {
    let cocoa = match code {
        EPERM | EACCES if is_write => CocoaCode::FILE_WRITE_NO_PERMISSION,
        EPERM | EACCES => CocoaCode::FILE_READ_NO_PERMISSION,
        ENOENT if is_write => CocoaCode::FILE_NO_SUCH_FILE,
        ENOENT => CocoaCode::FILE_READ_NO_SUCH_FILE,
        EEXIST => CocoaCode::FILE_WRITE_FILE_EXISTS,
        EFBIG => CocoaCode::FILE_READ_TOO_LARGE,
        ENOSPC => CocoaCode::FILE_WRITE_OUT_OF_SPACE,
        EROFS => CocoaCode::FILE_WRITE_VOLUME_READ_ONLY,
        #[cfg(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "tvos",
            target_os = "watchos",
            target_os = "freebsd"
        ))]
        EFTYPE => CocoaCode::FILE_READ_CORRUPT_FILE,
        ECANCELED => CocoaCode::USER_CANCELLED,
        _ => return None,
    };

    Some(cocoa)
}

/// Build the error for a failed POSIX call.
///
/// Code 0 means the call failed without setting `errno` and yields the
/// unknown read or write error. Codes with a structured counterpart are wrapped
/// in a [`CocoaError`] carrying `location` and the POSIX value as its cause.
pub fn errno_error(
    code: i32,
    location: Option<Location>,
    is_write: bool,
    config: &TranslationConfig,
) -> PlatformError {
    if code == 0 {
        return CocoaError::new(CocoaCode::unknown(is_write)).into();
    }

    let lower: PlatformError = if config.typed_posix_errors() {
        PosixError::new(code).into()
    } else {
        GenericError::new(POSIX_DOMAIN, i64::from(code)).into()
    };

    let cocoa = if lower.is_cancelled_error() {
        Some(CocoaCode::USER_CANCELLED)
    } else {
        cocoa_code_for_posix(code, is_write)
    };

    let Some(cocoa) = cocoa else {
        trace!(errno = code, "No structured counterpart for errno");
        return lower;
    };

    debug!(
        errno = code,
        cocoa_code = cocoa.0,
        is_write,
        location = location.as_ref().map(ToString::to_string),
        "Translated errno"
    );

    let mut metadata = ErrorMetadata::builder();
    if let Some(location) = location {
        metadata = metadata.location(location);
    }

    CocoaError::with_metadata(cocoa, metadata.underlying(lower).build()).into()
}

/// Build the error for the calling thread's current `errno`
pub fn errno_last(
    location: Option<Location>,
    is_write: bool,
    config: &TranslationConfig,
) -> PlatformError {
    errno_error(PosixError::last().code(), location, is_write, config)
}

/// Build the error for a failed status code.
///
/// Status codes embedding a POSIX code are rebuilt through [`errno_error`],
/// keeping only the location from `metadata`. Anything else becomes a
/// [`StatusCodeError`]; a missing failure reason is filled in from the
/// configured lookup.
pub fn status_error(
    code: i32,
    metadata: ErrorMetadata,
    is_write: bool,
    config: &TranslationConfig,
) -> PlatformError {
    if let Some(posix) = codes::embedded_posix_code(code) {
        trace!(status = code, errno = posix, "Status code embeds errno");
        return errno_error(posix, metadata.location(), is_write, config);
    }

    let metadata = match metadata.failure_reason() {
        Some(_) => metadata,
        None => match config.failure_reason_for(code) {
            Some(reason) => metadata.with_failure_reason(reason),
            None => metadata,
        },
    };

    trace!(status = code, "Built status code error");
    StatusCodeError::with_metadata(code, metadata).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::POSIX_ERROR_BASE;
    use crate::config::NoStatusReasons;
    use crate::metadata::keys;
    use crate::posix::{EBADF, EIO};
    use url::Url;

    fn cocoa_code(err: &PlatformError) -> Option<CocoaCode> {
        match err {
            PlatformError::Cocoa(e) => Some(e.code()),
            _ => None,
        }
    }

    #[test]
    fn test_zero_is_unknown() {
        let config = TranslationConfig::default();

        let read = errno_error(0, Some("/tmp/x".into()), false, &config);
        assert_eq!(cocoa_code(&read), Some(CocoaCode::FILE_READ_UNKNOWN));
        assert!(read.underlying_error().is_none());
        assert!(read.user_info().is_empty());
        assert!(!read.is_file_not_found_error());
        assert!(!read.is_permission_error());
        assert!(!read.is_cancelled_error());

        let write = errno_error(0, None, true, &config);
        assert_eq!(cocoa_code(&write), Some(CocoaCode::FILE_WRITE_UNKNOWN));
        assert!(!write.is_file_not_found_error());
        assert!(!write.is_permission_error());
        assert!(!write.is_cancelled_error());
    }

    #[test]
    fn test_permission_mapping() {
        let config = TranslationConfig::default();

        for code in [EPERM, EACCES] {
            let read = errno_error(code, Some("/etc/sudoers".into()), false, &config);
            assert_eq!(cocoa_code(&read), Some(CocoaCode::FILE_READ_NO_PERMISSION));
            assert!(read.is_permission_error());

            let write = errno_error(code, Some("/etc/sudoers".into()), true, &config);
            assert_eq!(cocoa_code(&write), Some(CocoaCode::FILE_WRITE_NO_PERMISSION));
            assert!(write.is_permission_error());
        }
    }

    #[test]
    fn test_not_found_mapping() {
        let config = TranslationConfig::default();

        let read = errno_error(ENOENT, Some("/tmp/missing".into()), false, &config);
        assert_eq!(cocoa_code(&read), Some(CocoaCode::FILE_READ_NO_SUCH_FILE));
        assert!(read.is_file_not_found_error());

        let info = read.user_info();
        assert_eq!(info.get_str(keys::FILE_PATH), Some("/tmp/missing"));
        assert_eq!(
            info.get_url(keys::URL).map(Url::as_str),
            Some("file:///tmp/missing")
        );
        let underlying = read.underlying_error().unwrap();
        assert!(matches!(underlying, PlatformError::Posix(e) if e.code() == ENOENT));

        let write = errno_error(ENOENT, None, true, &config);
        assert_eq!(cocoa_code(&write), Some(CocoaCode::FILE_NO_SUCH_FILE));
    }

    #[test]
    fn test_other_mappings() {
        assert_eq!(cocoa_code_for_posix(EEXIST, true), Some(CocoaCode::FILE_WRITE_FILE_EXISTS));
        assert_eq!(cocoa_code_for_posix(EFBIG, false), Some(CocoaCode::FILE_READ_TOO_LARGE));
        assert_eq!(cocoa_code_for_posix(ENOSPC, true), Some(CocoaCode::FILE_WRITE_OUT_OF_SPACE));
        assert_eq!(cocoa_code_for_posix(EROFS, true), Some(CocoaCode::FILE_WRITE_VOLUME_READ_ONLY));
        assert_eq!(cocoa_code_for_posix(ECANCELED, false), Some(CocoaCode::USER_CANCELLED));
        assert_eq!(cocoa_code_for_posix(EBADF, false), None);
    }

    #[test]
    fn test_cancellation() {
        let err = errno_error(ECANCELED, None, false, &TranslationConfig::default());

        assert_eq!(cocoa_code(&err), Some(CocoaCode::USER_CANCELLED));
        assert!(err.is_cancelled_error());
        assert!(matches!(err.underlying_error(), Some(PlatformError::Posix(_))));
    }

    #[test]
    fn test_unmapped_returns_posix() {
        let err = errno_error(EIO, Some("/dev/disk0".into()), false, &TranslationConfig::default());

        assert!(matches!(err, PlatformError::Posix(e) if e.code() == EIO));
    }

    #[test]
    fn test_legacy_platform_uses_generic() {
        let config = TranslationConfig::new().with_platform_version(10);

        let err = errno_error(EBADF, None, false, &config);
        assert!(matches!(&err, PlatformError::Generic(g) if g.domain() == POSIX_DOMAIN));
        assert_eq!(err.to_errno(), Some(EBADF));

        let cancelled = errno_error(ECANCELED, None, false, &config);
        assert_eq!(cocoa_code(&cancelled), Some(CocoaCode::USER_CANCELLED));
        assert!(matches!(cancelled.underlying_error(), Some(PlatformError::Generic(_))));
    }

    #[test]
    fn test_url_location() {
        let url = Url::parse("https://example.com/upload").unwrap();
        let err = errno_error(EACCES, Some(url.clone().into()), true, &TranslationConfig::default());
        let info = err.user_info();

        assert_eq!(info.get_url(keys::URL), Some(&url));
        assert!(!info.contains_key(keys::FILE_PATH));
    }

    #[test]
    fn test_status_embedding_boundaries() {
        let config = TranslationConfig::default();

        let base = status_error(POSIX_ERROR_BASE, ErrorMetadata::default(), false, &config);
        assert!(matches!(base, PlatformError::Status(_)));

        let top = status_error(POSIX_ERROR_BASE + 1000, ErrorMetadata::default(), false, &config);
        assert!(matches!(top, PlatformError::Status(_)));

        let enoent = status_error(
            POSIX_ERROR_BASE + ENOENT,
            ErrorMetadata::builder()
                .description("dropped")
                .path("/tmp/gone")
                .build(),
            false,
            &config,
        );
        assert_eq!(cocoa_code(&enoent), Some(CocoaCode::FILE_READ_NO_SUCH_FILE));
        assert_eq!(enoent.user_info().get_str(keys::FILE_PATH), Some("/tmp/gone"));
        assert_eq!(enoent.user_info().get_str(keys::DESCRIPTION), None);

        let unmapped = status_error(POSIX_ERROR_BASE + EBADF, ErrorMetadata::default(), false, &config);
        assert!(matches!(unmapped, PlatformError::Posix(e) if e.code() == EBADF));
    }

    #[test]
    fn test_status_failure_reason_enrichment() {
        let config = TranslationConfig::default();

        let enriched = status_error(codes::FNF_ERR, ErrorMetadata::default(), false, &config);
        assert_eq!(enriched.to_string(), "File not found");
        assert!(enriched.is_file_not_found_error());

        let kept = status_error(
            codes::FNF_ERR,
            ErrorMetadata::builder().failure_reason("mine").build(),
            false,
            &config,
        );
        assert_eq!(kept.user_info().get_str(keys::FAILURE_REASON), Some("mine"));

        let silent = TranslationConfig::new().with_status_reasons(NoStatusReasons);
        let bare = status_error(codes::FNF_ERR, ErrorMetadata::default(), false, &silent);
        assert!(bare.user_info().is_empty());
    }
}
