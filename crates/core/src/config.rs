use crate::codes;
use std::fmt;
use std::sync::Arc;

/// Platform version reported when no emulation is configured
pub const CURRENT_PLATFORM_VERSION: u32 = u32::MAX;

/// First platform version with a typed errno representation.
///
/// Older platforms report POSIX failures as generic domain/code errors.
pub const TYPED_POSIX_MIN_VERSION: u32 = 11;

/// Source of human-readable failure reasons for status codes
pub trait StatusReasonLookup: Send + Sync + fmt::Debug {
    /// Text for `status`, or `None` if the code is not recognised
    fn failure_reason(&self, status: i32) -> Option<String>;
}

/// Lookup backed by the table of named status codes
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStatusReasons;

impl StatusReasonLookup for BuiltinStatusReasons {
    fn failure_reason(&self, status: i32) -> Option<String> {
        codes::builtin_reason(status).map(str::to_string)
    }
}

/// Lookup that never supplies a reason
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStatusReasons;

impl StatusReasonLookup for NoStatusReasons {
    fn failure_reason(&self, _status: i32) -> Option<String> {
        None
    }
}

/// Settings threaded through the error constructors.
///
/// Holds the emulated platform version and the status-reason lookup. It is passed
/// explicitly instead of living in process-wide state, so concurrent callers can
/// use different settings.
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    platform_version: u32,
    status_reasons: Arc<dyn StatusReasonLookup>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            platform_version: CURRENT_PLATFORM_VERSION,
            status_reasons: Arc::new(BuiltinStatusReasons),
        }
    }
}

impl TranslationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emulate an older platform major version
    pub fn with_platform_version(mut self, version: u32) -> Self {
        self.platform_version = version;
        self
    }

    pub fn with_status_reasons(mut self, lookup: impl StatusReasonLookup + 'static) -> Self {
        self.status_reasons = Arc::new(lookup);
        self
    }

    pub fn platform_version(&self) -> u32 {
        self.platform_version
    }

    /// True if the configured platform is at least `version`
    pub fn supports(&self, version: u32) -> bool {
        self.platform_version >= version
    }

    pub fn typed_posix_errors(&self) -> bool {
        self.supports(TYPED_POSIX_MIN_VERSION)
    }

    pub fn failure_reason_for(&self, status: i32) -> Option<String> {
        self.status_reasons.failure_reason(status)
    }
}
