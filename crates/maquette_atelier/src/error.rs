//! Workshop error types.
//!
//! A single malformed node never aborts an export — the parser and the
//! state-lifting pass degrade instead of failing. What can fail is the
//! pipeline itself (a plugin, the publisher), and those failures are
//! carried to the `export_source_code` boundary as one structured
//! error. Nothing in this crate panics past that boundary.

use thiserror::Error;

/// Failure inside a component or project plugin.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("plugin `{plugin}` failed: {message}")]
    Plugin {
        plugin: &'static str,
        message: String,
    },
}

impl GenerateError {
    pub fn plugin(plugin: &'static str, message: impl Into<String>) -> Self {
        Self::Plugin {
            plugin,
            message: message.into(),
        }
    }
}

/// Failure while producing the deliverable.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("zip archive failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive io failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can surface from the export entry point.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
