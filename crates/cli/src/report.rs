use errbridge_core::{Classify, PlatformError, UserInfo, UserInfoValue};
use serde::Serialize;
use std::fmt::Write as _;

/// Everything the explainer knows about one error
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub domain: String,
    pub code: i64,
    pub message: String,
    pub is_file_not_found: bool,
    pub is_permission: bool,
    pub is_cancelled: bool,
    pub user_info: UserInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying: Option<Box<ErrorReport>>,
}

impl ErrorReport {
    pub fn from_error(err: &PlatformError) -> Self {
        Self {
            domain: err.domain().to_string(),
            code: err.code(),
            message: err.to_string(),
            is_file_not_found: err.is_file_not_found_error(),
            is_permission: err.is_permission_error(),
            is_cancelled: err.is_cancelled_error(),
            user_info: err.user_info(),
            underlying: err
                .underlying_error()
                .map(|underlying| Box::new(ErrorReport::from_error(underlying))),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);

        let _ = writeln!(out, "{indent}{} ({} {})", self.message, self.domain, self.code);
        let _ = writeln!(
            out,
            "{indent}  file not found: {}, permission: {}, cancelled: {}",
            self.is_file_not_found, self.is_permission, self.is_cancelled
        );

        let mut keys: Vec<&String> = self.user_info.iter().map(|(key, _)| key).collect();
        keys.sort();
        for key in keys {
            if let Some(value) = self.user_info.get(key) {
                let _ = writeln!(out, "{indent}  {key}: {}", describe(value));
            }
        }

        if let Some(underlying) = &self.underlying {
            let _ = writeln!(out, "{indent}  caused by:");
            underlying.render_into(out, depth + 2);
        }
    }
}

fn describe(value: &UserInfoValue) -> String {
    match value {
        UserInfoValue::String(s) => s.clone(),
        UserInfoValue::Strings(v) => v.join(", "),
        UserInfoValue::Integer(i) => i.to_string(),
        UserInfoValue::Url(url) => url.to_string(),
        UserInfoValue::Error(err) => format!("{} ({} {})", err, err.domain(), err.code()),
        UserInfoValue::Attempter(_) => "<recovery attempter>".to_string(),
        UserInfoValue::Json(value) => value.to_string(),
    }
}
