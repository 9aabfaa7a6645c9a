//! Descriptive metadata attached to errors and its rendering into a
//! structured-error payload.

mod encoding;
mod user_info;

pub use encoding::StringEncoding;
pub use user_info::{keys, AttempterHandle, UserInfo, UserInfoValue};

use crate::error::PlatformError;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

/// Where a failing operation was pointed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    Url(Url),
}

impl Location {
    /// URL form of the location; relative paths resolve against the current directory
    pub fn to_url(&self) -> Option<Url> {
        match self {
            Location::Path(path) => file_url(path),
            Location::Url(url) => Some(url.clone()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Location::Path(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Path(path.to_path_buf())
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Location::Path(PathBuf::from(path))
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Location::Path(PathBuf::from(path))
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Location::Url(url)
    }
}

/// File URL for `path`. Relative paths resolve against the working directory;
/// when that cannot be read the payload carries the path without a URL.
fn file_url(path: &Path) -> Option<Url> {
    file_url_from(path, std::env::current_dir)
}

fn file_url_from(path: &Path, current_dir: impl FnOnce() -> io::Result<PathBuf>) -> Option<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot resolve relative path to a file URL");
                return None;
            }
        }
    };

    let url = Url::from_file_path(&absolute).ok();
    if url.is_none() {
        warn!(path = %absolute.display(), "Path has no file URL form");
    }
    url
}

/// Immutable description of a failure: messages, recovery hints, location,
/// cause and free-form attributes.
///
/// Build one with [`ErrorMetadata::builder`]; every field is optional.
#[derive(Debug, Clone, Default)]
pub struct ErrorMetadata {
    description: Option<String>,
    failure_reason: Option<String>,
    recovery_suggestion: Option<String>,
    recovery_options: Option<Vec<String>>,
    recovery_attempter: Option<AttempterHandle>,
    help_anchor: Option<String>,
    path: Option<PathBuf>,
    underlying: Option<Box<PlatformError>>,
    custom: Option<HashMap<String, UserInfoValue>>,
}

impl ErrorMetadata {
    pub fn builder() -> ErrorMetadataBuilder {
        ErrorMetadataBuilder::default()
    }

    /// Continue building from this metadata
    pub fn into_builder(self) -> ErrorMetadataBuilder {
        ErrorMetadataBuilder { metadata: self }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn recovery_suggestion(&self) -> Option<&str> {
        self.recovery_suggestion.as_deref()
    }

    pub fn recovery_options(&self) -> Option<&[String]> {
        self.recovery_options.as_deref()
    }

    pub fn recovery_attempter(&self) -> Option<&AttempterHandle> {
        self.recovery_attempter.as_ref()
    }

    pub fn help_anchor(&self) -> Option<&str> {
        self.help_anchor.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn path_string(&self) -> Option<String> {
        self.path
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned())
    }

    pub fn underlying(&self) -> Option<&PlatformError> {
        self.underlying.as_deref()
    }

    pub fn custom(&self) -> Option<&HashMap<String, UserInfoValue>> {
        self.custom.as_ref()
    }

    fn custom_value(&self, key: &str) -> Option<&UserInfoValue> {
        self.custom.as_ref().and_then(|custom| custom.get(key))
    }

    /// The URL attribute if one was set, otherwise the file URL of the path
    pub fn url(&self) -> Option<Url> {
        if let Some(url) = self.custom_value(keys::URL).and_then(UserInfoValue::as_url) {
            return Some(url.clone());
        }
        self.path.as_deref().and_then(file_url)
    }

    pub fn string_encoding(&self) -> Option<StringEncoding> {
        self.custom_value(keys::STRING_ENCODING)
            .and_then(UserInfoValue::as_integer)
            .and_then(|raw| u64::try_from(raw).ok())
            .map(StringEncoding)
    }

    /// The URL attribute if one was set, otherwise the path
    pub fn location(&self) -> Option<Location> {
        if let Some(url) = self.custom_value(keys::URL).and_then(UserInfoValue::as_url) {
            return Some(Location::Url(url.clone()));
        }
        self.path.clone().map(Location::Path)
    }

    pub(crate) fn with_failure_reason(mut self, reason: String) -> Self {
        self.failure_reason = Some(reason);
        self
    }

    /// Render the structured-error payload.
    ///
    /// Custom attributes are merged last and replace any standard key they
    /// collide with, including the description. Callers that put
    /// `NSLocalizedDescription` in the custom map get their value, not the
    /// description field.
    pub fn to_user_info(&self) -> UserInfo {
        let mut info = UserInfo::new();

        if let Some(description) = self.description.as_ref().or(self.failure_reason.as_ref()) {
            info.insert(keys::DESCRIPTION, description.clone());
        }
        if let Some(reason) = &self.failure_reason {
            info.insert(keys::FAILURE_REASON, reason.clone());
        }
        if let Some(suggestion) = &self.recovery_suggestion {
            info.insert(keys::RECOVERY_SUGGESTION, suggestion.clone());
        }
        if let Some(options) = &self.recovery_options {
            info.insert(keys::RECOVERY_OPTIONS, options.clone());
        }
        if let Some(attempter) = &self.recovery_attempter {
            info.insert(keys::RECOVERY_ATTEMPTER, attempter.clone());
        }
        if let Some(anchor) = &self.help_anchor {
            info.insert(keys::HELP_ANCHOR, anchor.clone());
        }
        if let Some(underlying) = &self.underlying {
            info.insert(keys::UNDERLYING_ERROR, UserInfoValue::Error(underlying.clone()));
        }
        if let Some(path) = &self.path {
            info.insert(keys::FILE_PATH, path.to_string_lossy().into_owned());
            if let Some(url) = file_url(path) {
                info.insert(keys::URL, url);
            }
        }
        if let Some(custom) = &self.custom {
            for (key, value) in custom {
                info.insert(key.clone(), value.clone());
            }
        }

        info
    }
}

/// Fluent builder for [`ErrorMetadata`]
#[derive(Debug, Clone, Default)]
pub struct ErrorMetadataBuilder {
    metadata: ErrorMetadata,
}

impl ErrorMetadataBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.metadata.failure_reason = Some(reason.into());
        self
    }

    pub fn recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.metadata.recovery_suggestion = Some(suggestion.into());
        self
    }

    pub fn recovery_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.recovery_options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn recovery_attempter(mut self, attempter: AttempterHandle) -> Self {
        self.metadata.recovery_attempter = Some(attempter);
        self
    }

    pub fn help_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.metadata.help_anchor = Some(anchor.into());
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata.path = Some(path.into());
        self
    }

    pub fn path_string(self, path: impl Into<String>) -> Self {
        self.path(PathBuf::from(path.into()))
    }

    /// Record a URL; a `file:` URL also sets the path
    pub fn url(mut self, url: Url) -> Self {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                self.metadata.path = Some(path);
            }
        }
        self.custom(keys::URL, url)
    }

    pub fn location(self, location: Location) -> Self {
        match location {
            Location::Path(path) => self.path(path),
            Location::Url(url) => self.url(url),
        }
    }

    pub fn string_encoding(self, encoding: StringEncoding) -> Self {
        // Out-of-range raw values would not survive the signed payload slot
        match i64::try_from(encoding.raw()) {
            Ok(raw) => self.custom(keys::STRING_ENCODING, raw),
            Err(_) => self,
        }
    }

    pub fn underlying(mut self, error: impl Into<PlatformError>) -> Self {
        self.metadata.underlying = Some(Box::new(error.into()));
        self
    }

    pub fn custom(mut self, key: impl Into<String>, value: impl Into<UserInfoValue>) -> Self {
        self.metadata
            .custom
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn custom_map(mut self, entries: HashMap<String, UserInfoValue>) -> Self {
        self.metadata
            .custom
            .get_or_insert_with(HashMap::new)
            .extend(entries);
        self
    }

    pub fn build(self) -> ErrorMetadata {
        self.metadata
    }
}
