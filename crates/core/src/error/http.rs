use super::{Classify, ErrorClass};
use crate::metadata::{ErrorMetadata, UserInfo};
use std::fmt;

/// Domain string of HTTP status failures
pub const HTTP_DOMAIN: &str = "HTTPError";

/// A failing HTTP response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpError {
    status_code: u16,
}

impl HttpError {
    pub fn new(status_code: u16) -> Self {
        Self { status_code }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> Option<&'static str> {
        http::StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
    }

    /// `HTTP <code> (<reason phrase>)`, without the phrase for unregistered codes
    pub fn failure_reason(&self) -> String {
        match self.reason_phrase() {
            Some(reason) => format!("HTTP {} ({reason})", self.status_code),
            None => format!("HTTP {}", self.status_code),
        }
    }

    pub fn class(&self) -> Option<ErrorClass> {
        match self.status_code {
            404 => Some(ErrorClass::FileNotFound),
            401 | 403 | 407 => Some(ErrorClass::Permission),
            _ => None,
        }
    }

    pub fn user_info(&self) -> UserInfo {
        ErrorMetadata::builder()
            .failure_reason(self.failure_reason())
            .build()
            .to_user_info()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.failure_reason())
    }
}

impl std::error::Error for HttpError {}

impl Classify for HttpError {
    fn matches(&self, class: ErrorClass) -> bool {
        self.class() == Some(class)
    }

    fn domain(&self) -> &str {
        HTTP_DOMAIN
    }

    fn code(&self) -> i64 {
        i64::from(self.status_code)
    }

    fn user_info(&self) -> UserInfo {
        HttpError::user_info(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::keys;

    #[test]
    fn test_failure_reason() {
        assert_eq!(HttpError::new(404).failure_reason(), "HTTP 404 (Not Found)");
        assert_eq!(HttpError::new(403).to_string(), "HTTP 403 (Forbidden)");
        assert_eq!(HttpError::new(599).failure_reason(), "HTTP 599");
    }

    #[test]
    fn test_classification_boundaries() {
        assert!(HttpError::new(404).is_file_not_found_error());
        assert!(!HttpError::new(403).is_file_not_found_error());
        assert!(!HttpError::new(405).is_file_not_found_error());

        for code in [401, 403, 407] {
            assert!(HttpError::new(code).is_permission_error());
        }
        assert!(!HttpError::new(404).is_permission_error());
        assert!(!HttpError::new(402).is_permission_error());

        for code in [100, 200, 204, 301, 400, 404, 499, 500, 503] {
            assert!(!HttpError::new(code).is_cancelled_error());
        }
    }

    #[test]
    fn test_user_info() {
        let info = HttpError::new(500).user_info();

        assert_eq!(
            info.get_str(keys::DESCRIPTION),
            Some("HTTP 500 (Internal Server Error)")
        );
        assert_eq!(
            info.get_str(keys::FAILURE_REASON),
            Some("HTTP 500 (Internal Server Error)")
        );
    }
}
