//! Error types for token rendering.
//!
//! [`RenderError`] wraps the template engine's errors so callers never depend
//! on the engine directly.

use std::fmt;

use swatch_core::SnapshotError;

/// Error type for rendering operations.
#[derive(Debug)]
pub enum RenderError {
    /// Template syntax error or evaluation failure.
    TemplateError(String),

    /// No template registered under the requested name.
    TemplateNotFound(String),

    /// Token data could not be serialized.
    SerializationError(String),

    /// Output format name not recognized.
    UnknownFormat(String),

    /// An extra template tried to claim a built-in output file name.
    ReservedFileName(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateError(msg) => write!(f, "template error: {}", msg),
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::SerializationError(msg) => write!(f, "serialization error: {}", msg),
            RenderError::UnknownFormat(name) => write!(
                f,
                "unknown output format '{}' (expected scss, ts or json)",
                name
            ),
            RenderError::ReservedFileName(name) => {
                write!(f, "'{}' is reserved for a built-in output", name)
            }
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<SnapshotError> for RenderError {
    fn from(err: SnapshotError) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::BadSerialization => RenderError::SerializationError(err.to_string()),
            _ => RenderError::TemplateError(err.to_string()),
        }
    }
}
