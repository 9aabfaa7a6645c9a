use super::{classify, Classify, ErrorClass, PlatformError};
use crate::metadata::{ErrorMetadata, UserInfo};
use std::fmt;

/// Domain string of the structured (Cocoa) error family
pub const COCOA_DOMAIN: &str = "NSCocoaErrorDomain";

/// Code within [`COCOA_DOMAIN`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CocoaCode(pub i64);

impl CocoaCode {
    pub const FILE_NO_SUCH_FILE: Self = Self(4);
    pub const FILE_LOCKING: Self = Self(255);
    pub const FILE_READ_UNKNOWN: Self = Self(256);
    pub const FILE_READ_NO_PERMISSION: Self = Self(257);
    pub const FILE_READ_INVALID_FILE_NAME: Self = Self(258);
    pub const FILE_READ_CORRUPT_FILE: Self = Self(259);
    pub const FILE_READ_NO_SUCH_FILE: Self = Self(260);
    pub const FILE_READ_TOO_LARGE: Self = Self(263);
    pub const FILE_WRITE_UNKNOWN: Self = Self(512);
    pub const FILE_WRITE_NO_PERMISSION: Self = Self(513);
    pub const FILE_WRITE_FILE_EXISTS: Self = Self(516);
    pub const FILE_WRITE_OUT_OF_SPACE: Self = Self(640);
    pub const FILE_WRITE_VOLUME_READ_ONLY: Self = Self(642);
    pub const USER_CANCELLED: Self = Self(3072);
    pub const FEATURE_UNSUPPORTED: Self = Self(3328);
    pub const UBIQUITOUS_FILE_UNAVAILABLE: Self = Self(4353);

    /// Catch-all code for an unidentified read or write failure
    pub fn unknown(is_write: bool) -> Self {
        if is_write {
            Self::FILE_WRITE_UNKNOWN
        } else {
            Self::FILE_READ_UNKNOWN
        }
    }

    pub fn class(self) -> Option<ErrorClass> {
        match self {
            Self::FILE_NO_SUCH_FILE
            | Self::FILE_READ_NO_SUCH_FILE
            | Self::UBIQUITOUS_FILE_UNAVAILABLE => Some(ErrorClass::FileNotFound),
            Self::FILE_READ_NO_PERMISSION | Self::FILE_WRITE_NO_PERMISSION => {
                Some(ErrorClass::Permission)
            }
            Self::USER_CANCELLED => Some(ErrorClass::Cancelled),
            _ => None,
        }
    }

    pub fn default_message(self) -> Option<&'static str> {
        let message = match self {
            Self::FILE_NO_SUCH_FILE | Self::FILE_READ_NO_SUCH_FILE => "The file doesn't exist.",
            Self::FILE_LOCKING => "The file couldn't be locked.",
            Self::FILE_READ_UNKNOWN => "The file couldn't be opened.",
            Self::FILE_READ_NO_PERMISSION => {
                "The file couldn't be opened because you don't have permission to view it."
            }
            Self::FILE_READ_INVALID_FILE_NAME => {
                "The file couldn't be opened because the file name is invalid."
            }
            Self::FILE_READ_CORRUPT_FILE => {
                "The file couldn't be opened because it isn't in the correct format."
            }
            Self::FILE_READ_TOO_LARGE => "The file couldn't be opened because it is too large.",
            Self::FILE_WRITE_UNKNOWN => "The file couldn't be saved.",
            Self::FILE_WRITE_NO_PERMISSION => {
                "The file couldn't be saved because you don't have permission."
            }
            Self::FILE_WRITE_FILE_EXISTS => {
                "The file couldn't be saved because a file with the same name already exists."
            }
            Self::FILE_WRITE_OUT_OF_SPACE => {
                "The file couldn't be saved because there isn't enough space."
            }
            Self::FILE_WRITE_VOLUME_READ_ONLY => {
                "The file couldn't be saved because the volume is read only."
            }
            Self::USER_CANCELLED => "The operation was cancelled.",
            Self::FEATURE_UNSUPPORTED => "The requested operation is not supported.",
            Self::UBIQUITOUS_FILE_UNAVAILABLE => "The file is not available.",
            _ => return None,
        };
        Some(message)
    }
}

/// An error in [`COCOA_DOMAIN`]
#[derive(Debug, Clone)]
pub struct CocoaError {
    code: CocoaCode,
    metadata: ErrorMetadata,
}

impl CocoaError {
    pub fn new(code: CocoaCode) -> Self {
        Self::with_metadata(code, ErrorMetadata::default())
    }

    pub fn with_metadata(code: CocoaCode, metadata: ErrorMetadata) -> Self {
        Self { code, metadata }
    }

    pub fn code(&self) -> CocoaCode {
        self.code
    }

    pub fn metadata(&self) -> &ErrorMetadata {
        &self.metadata
    }

    pub fn user_info(&self) -> UserInfo {
        self.metadata.to_user_info()
    }
}

impl fmt::Display for CocoaError {
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
                "The operation couldn't be completed. ({COCOA_DOMAIN} error {}.)",
                self.code.0
            ),
        }
    }
}

impl std::error::Error for CocoaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.metadata
            .underlying()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl Classify for CocoaError {
    fn matches(&self, class: ErrorClass) -> bool {
        classify(class, None, None, self.code.class(), self.metadata.underlying())
    }

    fn underlying_error(&self) -> Option<&PlatformError> {
        self.metadata.underlying()
    }

    fn domain(&self) -> &str {
        COCOA_DOMAIN
    }

    fn code(&self) -> i64 {
        self.code.0
    }

    fn user_info(&self) -> UserInfo {
        CocoaError::user_info(self)
    }
}
