use super::{classify, Classify, ErrorClass, PlatformError};
use crate::codes;
use crate::metadata::{ErrorMetadata, UserInfo};
use std::fmt;

/// Domain string of legacy status codes
pub const STATUS_DOMAIN: &str = "NSOSStatusErrorDomain";

/// A failing legacy status code with its metadata
#[derive(Debug, Clone)]
pub struct StatusCodeError {
    code: i32,
    metadata: ErrorMetadata,
}

impl StatusCodeError {
    pub fn new(code: i32) -> Self {
        Self::with_metadata(code, ErrorMetadata::default())
    }

    pub fn with_metadata(code: i32, metadata: ErrorMetadata) -> Self {
        Self { code, metadata }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn metadata(&self) -> &ErrorMetadata {
        &self.metadata
    }

    pub fn user_info(&self) -> UserInfo {
        self.metadata.to_user_info()
    }
}

impl fmt::Display for StatusCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self
            .metadata
            .description()
            .or_else(|| self.metadata.failure_reason())
        {
            Some(message) => f.write_str(message),
            None => write!(
                f,
                "The operation couldn't be completed. ({STATUS_DOMAIN} error {}.)",
                self.code
            ),
        }
    }
}

impl std::error::Error for StatusCodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.metadata
            .underlying()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl Classify for StatusCodeError {
    fn matches(&self, class: ErrorClass) -> bool {
        classify(
            class,
            codes::embedded_posix_code(self.code),
            Some(self.code),
            None,
            self.metadata.underlying(),
        )
    }

    fn underlying_error(&self) -> Option<&PlatformError> {
        self.metadata.underlying()
    }

    fn domain(&self) -> &str {
        STATUS_DOMAIN
    }

    fn code(&self) -> i64 {
        i64::from(self.code)
    }

    fn user_info(&self) -> UserInfo {
        StatusCodeError::user_info(self)
    }
}
