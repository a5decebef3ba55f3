use mailweave_core::TemplateError;
use thiserror::Error;

/// Renderer errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid {kind} element '{id}': {message}")]
    InvalidElement {
        id: String,
        kind: String,
        message: String,
    },

    #[error("Invalid repeat {field} '{value}'")]
    InvalidMarker { field: String, value: String },

    #[error("Document shell error: {message}")]
    Shell { message: String },

    #[error(transparent)]
    Core(#[from] TemplateError),
}

impl RenderError {
    pub fn invalid_element(
        id: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidElement {
            id: id.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn invalid_marker(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidMarker {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn shell(message: impl Into<String>) -> Self {
        Self::Shell {
            message: message.into(),
        }
    }
}

impl From<tera::Error> for RenderError {
    fn from(err: tera::Error) -> Self {
        Self::shell(err.to_string())
    }
}
