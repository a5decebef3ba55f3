use thiserror::Error;

use crate::validation::ValidationIssue;

/// Template engine errors
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid template: {}", summarize(.issues))]
    Invalid { issues: Vec<ValidationIssue> },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Syntax error: {message}")]
    Syntax { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TemplateError {
    pub fn invalid(issues: Vec<ValidationIssue>) -> Self {
        Self::Invalid { issues }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    match issues {
        [] => "no issues recorded".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}
