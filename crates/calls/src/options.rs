use errbridge_core::{ErrorMetadata, Location, TranslationConfig, UserInfoValue};
use std::collections::HashMap;
use std::path::PathBuf;
use url::Url;

/// What to attach to the error if a wrapped call fails
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    description: Option<String>,
    location: Option<Location>,
    custom: Option<HashMap<String, UserInfoValue>>,
    is_write: bool,
    config: TranslationConfig,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        self.with_location(Location::Path(path.into()))
    }

    pub fn with_url(self, url: Url) -> Self {
        self.with_location(Location::Url(url))
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<UserInfoValue>) -> Self {
        self.custom
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Mark the call as writing, which selects the write-side error codes
    pub fn with_write(mut self, is_write: bool) -> Self {
        self.is_write = is_write;
        self
    }

    pub fn with_config(mut self, config: TranslationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn is_write(&self) -> bool {
        self.is_write
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// Metadata for a status-code failure
    pub(crate) fn metadata(&self) -> ErrorMetadata {
        let mut builder = ErrorMetadata::builder();
        if let Some(description) = &self.description {
            builder = builder.description(description.clone());
        }
        if let Some(location) = &self.location {
            builder = builder.location(location.clone());
        }
        if let Some(custom) = &self.custom {
            builder = builder.custom_map(custom.clone());
        }
        builder.build()
    }
}
