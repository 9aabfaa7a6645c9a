use anyhow::Result;
use errbridge_core::{BuiltinStatusReasons, NoStatusReasons, TranslationConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub logging: LoggingSettings,
    pub translation: TranslationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TranslationSettings {
    /// Emulated platform major version; `None` means the current platform
    pub platform_version: Option<u32>,
    pub status_reasons: StatusReasonSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {s}")),
        }
    }
}

/// Where status-code failure reasons come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusReasonSource {
    #[default]
    Builtin,
    None,
}

impl FromStr for StatusReasonSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "builtin" => Ok(StatusReasonSource::Builtin),
            "none" => Ok(StatusReasonSource::None),
            _ => Err(anyhow::anyhow!("Invalid status reason source: {s}")),
        }
    }
}

impl fmt::Display for StatusReasonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusReasonSource::Builtin => write!(f, "builtin"),
            StatusReasonSource::None => write!(f, "none"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `ERRBRIDGE_*` keys
    pub fn load_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Logging settings
        if let Some(level) = lookup("ERRBRIDGE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("ERRBRIDGE_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }

        // Translation settings
        if let Some(version) = lookup("ERRBRIDGE_PLATFORM_VERSION") {
            self.translation.platform_version = Some(version.parse()?);
        }
        if let Some(source) = lookup("ERRBRIDGE_STATUS_REASONS") {
            self.translation.status_reasons = source.parse()?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        if self.translation.platform_version == Some(0) {
            return Err(anyhow::anyhow!("Platform version must be greater than 0"));
        }

        Ok(())
    }

    pub fn translation_config(&self) -> TranslationConfig {
        let mut config = TranslationConfig::new();
        if let Some(version) = self.translation.platform_version {
            config = config.with_platform_version(version);
        }

        match self.translation.status_reasons {
            StatusReasonSource::Builtin => config.with_status_reasons(BuiltinStatusReasons),
            StatusReasonSource::None => config.with_status_reasons(NoStatusReasons),
        }
    }
}
