use super::{classify, Classify, ErrorClass, PlatformError};
use crate::metadata::{ErrorMetadata, UserInfo};
use std::fmt;

/// Domain string of URL-loading failures
pub const URL_DOMAIN: &str = "NSURLErrorDomain";

/// Code within [`URL_DOMAIN`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UrlErrorCode(pub i64);

impl UrlErrorCode {
    pub const CANCELLED: Self = Self(-999);
    pub const BAD_URL: Self = Self(-1000);
    pub const TIMED_OUT: Self = Self(-1001);
    pub const CANNOT_FIND_HOST: Self = Self(-1003);
    pub const NOT_CONNECTED_TO_INTERNET: Self = Self(-1009);
    pub const USER_CANCELLED_AUTHENTICATION: Self = Self(-1012);
    pub const FILE_DOES_NOT_EXIST: Self = Self(-1100);
    pub const FILE_IS_DIRECTORY: Self = Self(-1101);
    pub const NO_PERMISSIONS_TO_READ_FILE: Self = Self(-1102);

    pub fn class(self) -> Option<ErrorClass> {
        match self {
            Self::FILE_DOES_NOT_EXIST => Some(ErrorClass::FileNotFound),
            Self::NO_PERMISSIONS_TO_READ_FILE => Some(ErrorClass::Permission),
            Self::CANCELLED | Self::USER_CANCELLED_AUTHENTICATION => Some(ErrorClass::Cancelled),
            _ => None,
        }
    }

    pub fn default_message(self) -> Option<&'static str> {
        let message = match self {
            Self::CANCELLED => "cancelled",
            Self::BAD_URL => "unsupported URL",
            Self::TIMED_OUT => "The request timed out.",
            Self::CANNOT_FIND_HOST => "A server with the specified hostname could not be found.",
            Self::NOT_CONNECTED_TO_INTERNET => "The Internet connection appears to be offline.",
            Self::USER_CANCELLED_AUTHENTICATION => "The user cancelled authentication.",
            Self::FILE_DOES_NOT_EXIST => "The requested URL was not found on this server.",
            Self::FILE_IS_DIRECTORY => "The file is a directory.",
            Self::NO_PERMISSIONS_TO_READ_FILE => "You don't have permission to read the file.",
            _ => return None,
        };
        Some(message)
    }
}

/// An error in [`URL_DOMAIN`]
#[derive(Debug, Clone)]
pub struct UrlLoadingError {
    code: UrlErrorCode,
    metadata: ErrorMetadata,
}

impl UrlLoadingError {
    pub fn new(code: UrlErrorCode) -> Self {
        Self::with_metadata(code, ErrorMetadata::default())
    }

    pub fn with_metadata(code: UrlErrorCode, metadata: ErrorMetadata) -> Self {
        Self { code, metadata }
    }

    pub fn code(&self) -> UrlErrorCode {
        self.code
    }

    pub fn metadata(&self) -> &ErrorMetadata {
        &self.metadata
    }

    pub fn user_info(&self) -> UserInfo {
        self.metadata.to_user_info()
    }
}

impl fmt::Display for UrlLoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .metadata
            .description()
            .or_else(|| self.metadata.failure_reason())
            .or_else(|| self.code.default_message());

        match message {
            Some(message) => f.write_str(message),
            None => write!(
                f,
                "The operation couldn't be completed. ({URL_DOMAIN} error {}.)",
                self.code.0
            ),
        }
    }
}

impl std::error::Error for UrlLoadingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.metadata
            .underlying()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl Classify for UrlLoadingError {
    fn matches(&self, class: ErrorClass) -> bool {
        classify(class, None, None, self.code.class(), self.metadata.underlying())
    }

    fn underlying_error(&self) -> Option<&PlatformError> {
        self.metadata.underlying()
    }

    fn domain(&self) -> &str {
        URL_DOMAIN
    }

    fn code(&self) -> i64 {
        self.code.0
    }

    fn user_info(&self) -> UserInfo {
        UrlLoadingError::user_info(self)
    }
}
