use super::{CocoaCode, CocoaError, GenericError, HttpError, PlatformError, UrlErrorCode, UrlLoadingError};
use crate::config::TranslationConfig;
use crate::metadata::{ErrorMetadataBuilder, Location, UserInfoValue};
use crate::posix::PosixError;
use crate::translate;
use std::borrow::Cow;
use std::path::PathBuf;
use url::Url;

/// Builder for creating errors with a fluent API
pub struct ErrorBuilder;

impl ErrorBuilder {
    /// Legacy status code errors
    pub fn status(code: i32) -> StatusErrorBuilder {
        StatusErrorBuilder {
            code,
            metadata: ErrorMetadataBuilder::default(),
            is_write: false,
            config: TranslationConfig::default(),
        }
    }

    /// POSIX errno errors
    pub fn errno(code: i32) -> ErrnoErrorBuilder {
        ErrnoErrorBuilder {
            code,
            location: None,
            is_write: false,
            config: TranslationConfig::default(),
        }
    }

    /// POSIX error from the calling thread's current errno
    pub fn last_errno() -> ErrnoErrorBuilder {
        Self::errno(PosixError::last().code())
    }

    /// Structured errors
    pub fn cocoa(code: CocoaCode) -> CocoaErrorBuilder {
        CocoaErrorBuilder {
            code,
            metadata: ErrorMetadataBuilder::default(),
        }
    }

    /// URL-loading errors
    pub fn url_loading(code: UrlErrorCode) -> UrlLoadingErrorBuilder {
        UrlLoadingErrorBuilder {
            code,
            metadata: ErrorMetadataBuilder::default(),
        }
    }

    /// HTTP status errors
    pub fn http(status_code: u16) -> PlatformError {
        HttpError::new(status_code).into()
    }

    /// Errors from an arbitrary domain
    pub fn generic(domain: impl Into<Cow<'static, str>>, code: i64) -> GenericErrorBuilder {
        GenericErrorBuilder {
            domain: domain.into(),
            code,
            metadata: ErrorMetadataBuilder::default(),
        }
    }
}

pub struct StatusErrorBuilder {
    code: i32,
    metadata: ErrorMetadataBuilder,
    is_write: bool,
    config: TranslationConfig,
}

impl StatusErrorBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata = self.metadata.description(description);
        self
    }

    pub fn failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.metadata = self.metadata.failure_reason(reason);
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata = self.metadata.path(path);
        self
    }

    pub fn url(mut self, url: Url) -> Self {
        self.metadata = self.metadata.url(url);
        self
    }

    pub fn underlying(mut self, error: impl Into<PlatformError>) -> Self {
        self.metadata = self.metadata.underlying(error);
        self
    }

    pub fn custom(mut self, key: impl Into<String>, value: impl Into<UserInfoValue>) -> Self {
        self.metadata = self.metadata.custom(key, value);
        self
    }

    /// Set any other metadata field
    pub fn with_metadata<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ErrorMetadataBuilder) -> ErrorMetadataBuilder,
    {
        self.metadata = f(self.metadata);
        self
    }

    pub fn write(mut self, is_write: bool) -> Self {
        self.is_write = is_write;
        self
    }

    pub fn config(mut self, config: &TranslationConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn build(self) -> PlatformError {
        translate::status_error(self.code, self.metadata.build(), self.is_write, &self.config)
    }
}

pub struct ErrnoErrorBuilder {
    code: i32,
    location: Option<Location>,
    is_write: bool,
    config: TranslationConfig,
}

impl ErrnoErrorBuilder {
    pub fn path(self, path: impl Into<PathBuf>) -> Self {
        self.location(Location::Path(path.into()))
    }

    pub fn url(self, url: Url) -> Self {
        self.location(Location::Url(url))
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn write(mut self, is_write: bool) -> Self {
        self.is_write = is_write;
        self
    }

    pub fn config(mut self, config: &TranslationConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn build(self) -> PlatformError {
        translate::errno_error(self.code, self.location, self.is_write, &self.config)
    }
}

pub struct CocoaErrorBuilder {
    code: CocoaCode,
    metadata: ErrorMetadataBuilder,
}

impl CocoaErrorBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata = self.metadata.description(description);
        self
    }

    pub fn failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.metadata = self.metadata.failure_reason(reason);
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata = self.metadata.path(path);
        self
    }

    pub fn url(mut self, url: Url) -> Self {
        self.metadata = self.metadata.url(url);
        self
    }

    pub fn underlying(mut self, error: impl Into<PlatformError>) -> Self {
        self.metadata = self.metadata.underlying(error);
        self
    }

    pub fn with_metadata<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ErrorMetadataBuilder) -> ErrorMetadataBuilder,
    {
        self.metadata = f(self.metadata);
        self
    }

    pub fn build(self) -> PlatformError {
        CocoaError::with_metadata(self.code, self.metadata.build()).into()
    }
}

pub struct UrlLoadingErrorBuilder {
    code: UrlErrorCode,
    metadata: ErrorMetadataBuilder,
}

impl UrlLoadingErrorBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata = self.metadata.description(description);
        self
    }

    pub fn url(mut self, url: Url) -> Self {
        self.metadata = self.metadata.url(url);
        self
    }

    pub fn underlying(mut self, error: impl Into<PlatformError>) -> Self {
        self.metadata = self.metadata.underlying(error);
        self
    }

    pub fn with_metadata<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ErrorMetadataBuilder) -> ErrorMetadataBuilder,
    {
        self.metadata = f(self.metadata);
        self
    }

    pub fn build(self) -> PlatformError {
        UrlLoadingError::with_metadata(self.code, self.metadata.build()).into()
    }
}

pub struct GenericErrorBuilder {
    domain: Cow<'static, str>,
    code: i64,
    metadata: ErrorMetadataBuilder,
}

impl GenericErrorBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata = self.metadata.description(description);
        self
    }

    pub fn underlying(mut self, error: impl Into<PlatformError>) -> Self {
        self.metadata = self.metadata.underlying(error);
        self
    }

    pub fn with_metadata<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ErrorMetadataBuilder) -> ErrorMetadataBuilder,
    {
        self.metadata = f(self.metadata);
        self
    }

    pub fn build(self) -> PlatformError {
        GenericError::with_metadata(self.domain, self.code, self.metadata.build()).into()
    }
}
