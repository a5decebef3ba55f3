use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::TemplateError;
use crate::markers::DialectKind;

/// Workspace-wide configuration shared by the renderer, the engine and the CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MailweaveConfig {
    /// Repeat-marker dialect written by the renderer and scanned by the engine
    pub dialect: DialectKind,
    /// Document shell settings
    pub document: DocumentConfig,
    /// Logging settings (consumed by the CLI subscriber)
    pub logging: LoggingConfig,
}

/// Settings for the HTML document wrapped around rendered elements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocumentConfig {
    /// Body background colour
    pub background_color: String,
    /// Background colour of the centred content container
    pub container_background: String,
    /// Max width of the content container, e.g. `600px`
    pub container_width: String,
    /// Title used by the fallback shell when no template name is given
    pub fallback_title: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for MailweaveConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::Comment,
            document: DocumentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            background_color: "#f5f5f5".to_string(),
            container_background: "#ffffff".to_string(),
            container_width: "600px".to_string(),
            fallback_title: "Email Template".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl MailweaveConfig {
    /// Load configuration from a YAML file, then apply environment overrides
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: Self = serde_yaml::from_str(&content)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, TemplateError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `MAILWEAVE_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), TemplateError> {
        if let Some(dialect) = get_env_optional("MAILWEAVE_DIALECT") {
            self.dialect = DialectKind::from_str(&dialect)?;
        }
        if let Some(level) = get_env_optional("MAILWEAVE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = get_env_optional("MAILWEAVE_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.document.container_width.trim().is_empty() {
            return Err(TemplateError::configuration(
                "document.container_width cannot be empty",
            ));
        }

        self.logging.validate()
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), TemplateError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(TemplateError::configuration(format!(
                "logging.level '{}' is invalid, expected trace, debug, info, warn, or error",
                self.level
            )));
        }

        let valid_formats = ["compact", "pretty", "json"];
        if !valid_formats.contains(&self.format.to_lowercase().as_str()) {
            return Err(TemplateError::configuration(format!(
                "logging.format '{}' is invalid, expected compact, pretty, or json",
                self.format
            )));
        }

        Ok(())
    }
}

fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
