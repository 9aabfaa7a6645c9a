use crate::error::PlatformError;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::any::Any;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Payload keys understood by the platform's structured-error presentation layer
pub mod keys {
    pub const DESCRIPTION: &str = "NSLocalizedDescription";
    pub const FAILURE_REASON: &str = "NSLocalizedFailureReason";
    pub const RECOVERY_SUGGESTION: &str = "NSLocalizedRecoverySuggestion";
    pub const RECOVERY_OPTIONS: &str = "NSLocalizedRecoveryOptions";
    pub const RECOVERY_ATTEMPTER: &str = "NSRecoveryAttempter";
    pub const HELP_ANCHOR: &str = "NSHelpAnchor";
    pub const UNDERLYING_ERROR: &str = "NSUnderlyingError";
    pub const FILE_PATH: &str = "NSFilePath";
    pub const URL: &str = "NSURL";
    pub const STRING_ENCODING: &str = "NSStringEncodingErrorKey";
}

/// Opaque, shared reference to a legacy recovery delegate
#[derive(Clone)]
pub struct AttempterHandle(Arc<dyn Any + Send + Sync>);

impl AttempterHandle {
    pub fn new(attempter: impl Any + Send + Sync) -> Self {
        Self(Arc::new(attempter))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// True if both handles point at the same delegate
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for AttempterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AttempterHandle(..)")
    }
}

/// A single value in a rendered error payload
#[derive(Debug, Clone)]
pub enum UserInfoValue {
    String(String),
    Strings(Vec<String>),
    Integer(i64),
    Url(Url),
    Error(Box<PlatformError>),
    Attempter(AttempterHandle),
    Json(serde_json::Value),
}

impl UserInfoValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            UserInfoValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            UserInfoValue::Strings(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            UserInfoValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            UserInfoValue::Url(url) => Some(url),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&PlatformError> {
        match self {
            UserInfoValue::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_attempter(&self) -> Option<&AttempterHandle> {
        match self {
            UserInfoValue::Attempter(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            UserInfoValue::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Errors compare by domain, code and message; attempters by identity.
impl PartialEq for UserInfoValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UserInfoValue::String(a), UserInfoValue::String(b)) => a == b,
            (UserInfoValue::Strings(a), UserInfoValue::Strings(b)) => a == b,
            (UserInfoValue::Integer(a), UserInfoValue::Integer(b)) => a == b,
            (UserInfoValue::Url(a), UserInfoValue::Url(b)) => a == b,
            (UserInfoValue::Error(a), UserInfoValue::Error(b)) => {
                a.domain() == b.domain() && a.code() == b.code() && a.to_string() == b.to_string()
            }
            (UserInfoValue::Attempter(a), UserInfoValue::Attempter(b)) => a.ptr_eq(b),
            (UserInfoValue::Json(a), UserInfoValue::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for UserInfoValue {
    fn from(value: &str) -> Self {
        UserInfoValue::String(value.to_string())
    }
}

impl From<String> for UserInfoValue {
    fn from(value: String) -> Self {
        UserInfoValue::String(value)
    }
}

impl From<Vec<String>> for UserInfoValue {
    fn from(value: Vec<String>) -> Self {
        UserInfoValue::Strings(value)
    }
}

impl From<i64> for UserInfoValue {
    fn from(value: i64) -> Self {
        UserInfoValue::Integer(value)
    }
}

impl From<Url> for UserInfoValue {
    fn from(value: Url) -> Self {
        UserInfoValue::Url(value)
    }
}

impl From<PlatformError> for UserInfoValue {
    fn from(value: PlatformError) -> Self {
        UserInfoValue::Error(Box::new(value))
    }
}

impl From<AttempterHandle> for UserInfoValue {
    fn from(value: AttempterHandle) -> Self {
        UserInfoValue::Attempter(value)
    }
}

impl From<serde_json::Value> for UserInfoValue {
    fn from(value: serde_json::Value) -> Self {
        UserInfoValue::Json(value)
    }
}

#[derive(Serialize)]
struct ErrorSummary<'a> {
    domain: &'a str,
    code: i64,
    description: String,
}

impl Serialize for UserInfoValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UserInfoValue::String(s) => serializer.serialize_str(s),
            UserInfoValue::Strings(v) => v.serialize(serializer),
            UserInfoValue::Integer(i) => serializer.serialize_i64(*i),
            UserInfoValue::Url(url) => serializer.serialize_str(url.as_str()),
            UserInfoValue::Error(err) => ErrorSummary {
                domain: err.domain(),
                code: err.code(),
                description: err.to_string(),
            }
            .serialize(serializer),
            UserInfoValue::Attempter(_) => serializer.serialize_str("<recovery attempter>"),
            UserInfoValue::Json(value) => value.serialize(serializer),
        }
    }
}

/// Flat string-keyed payload rendered from error metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInfo {
    entries: HashMap<String, UserInfoValue>,
}

impl UserInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<UserInfoValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&UserInfoValue> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(UserInfoValue::as_str)
    }

    pub fn get_url(&self, key: &str) -> Option<&Url> {
        self.get(key).and_then(UserInfoValue::as_url)
    }

    pub fn get_error(&self, key: &str) -> Option<&PlatformError> {
        self.get(key).and_then(UserInfoValue::as_error)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, UserInfoValue> {
        self.entries.iter()
    }

    pub fn into_inner(self) -> HashMap<String, UserInfoValue> {
        self.entries
    }
}

impl From<HashMap<String, UserInfoValue>> for UserInfo {
    fn from(entries: HashMap<String, UserInfoValue>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a UserInfo {
    type Item = (&'a String, &'a UserInfoValue);
    type IntoIter = hash_map::Iter<'a, String, UserInfoValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for UserInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();

        let mut map = serializer.serialize_map(Some(keys.len()))?;
        for key in keys {
            map.serialize_entry(key, &self.entries[key])?;
        }
        map.end()
    }
}
