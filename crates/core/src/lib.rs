pub mod codes;
pub mod config;
pub mod error;
pub mod metadata;
pub mod posix;
pub mod translate;

pub use config::{BuiltinStatusReasons, NoStatusReasons, StatusReasonLookup, TranslationConfig};
pub use error::{
    Classify, CocoaCode, CocoaError, ErrorBuilder, ErrorClass, GenericError, HttpError,
    PlatformError, Result, StatusCodeError, UrlErrorCode, UrlLoadingError,
};
pub use metadata::{
    keys, AttempterHandle, ErrorMetadata, ErrorMetadataBuilder, Location, StringEncoding,
    UserInfo, UserInfoValue,
};
pub use posix::PosixError;

// Re-export the constructors
pub use translate::{cocoa_code_for_posix, errno_error, errno_last, status_error};
