use super::{CocoaCode, Classify, ErrorClass, PlatformError, UrlErrorCode, COCOA_DOMAIN, URL_DOMAIN};
use crate::metadata::{ErrorMetadata, UserInfo};
use std::borrow::Cow;
use std::fmt;

/// An error identified only by its domain string and code.
///
/// Carries POSIX codes when an older platform is emulated, and anything
/// received from a domain without a dedicated representation.
#[derive(Debug, Clone)]
pub struct GenericError {
    domain: Cow<'static, str>,
    code: i64,
    metadata: ErrorMetadata,
}

impl GenericError {
    pub fn new(domain: impl Into<Cow<'static, str>>, code: i64) -> Self {
        Self::with_metadata(domain, code, ErrorMetadata::default())
    }

    pub fn with_metadata(
        domain: impl Into<Cow<'static, str>>,
        code: i64,
        metadata: ErrorMetadata,
    ) -> Self {
        Self {
            domain: domain.into(),
            code,
            metadata,
        }
    }

    /// Catch-all read or write failure in the Cocoa domain
    pub fn unknown(is_write: bool) -> Self {
        Self::new(COCOA_DOMAIN, CocoaCode::unknown(is_write).0)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn metadata(&self) -> &ErrorMetadata {
        &self.metadata
    }

    pub fn user_info(&self) -> UserInfo {
        self.metadata.to_user_info()
    }

    /// Class implied by the code when the domain has a known code table
    pub fn class(&self) -> Option<ErrorClass> {
        match self.domain() {
            COCOA_DOMAIN => CocoaCode(self.code).class(),
            URL_DOMAIN => UrlErrorCode(self.code).class(),
            _ => None,
        }
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self
            .metadata
            .description()
            .or_else(|| self.metadata.failure_reason())
        {
            Some(message) => f.write_str(message),
            None => write!(
                f,
                "The operation couldn't be completed. ({} error {}.)",
                self.domain, self.code
            ),
        }
    }
}

impl std::error::Error for GenericError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.metadata
            .underlying()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl Classify for GenericError {
    fn matches(&self, class: ErrorClass) -> bool {
        PlatformError::from(self.clone()).matches(class)
    }

    fn underlying_error(&self) -> Option<&PlatformError> {
        self.metadata.underlying()
    }

    fn domain(&self) -> &str {
        GenericError::domain(self)
    }

    fn code(&self) -> i64 {
        self.code
    }

    fn user_info(&self) -> UserInfo {
        GenericError::user_info(self)
    }
}
