//! Error handling for the scene picker
//!
//! This module defines the crate-level error type and a Result alias for use
//! throughout the library. Index build failures ([`BuildError`]) and I/O
//! errors convert into [`PickerError`] via `?`.

use thiserror::Error;

use crate::scene::BuildError;

/// Main error type for scene picker operations
#[derive(Error, Debug)]
pub enum PickerError {
    /// The scene index could not be built (fatal for the widget)
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// An engine operation was invoked before `initialize`
    #[error("Selection engine is not ready: node map has not been indexed yet")]
    NotReady,

    /// The engine was asked to initialize twice
    #[error("Selection engine is already initialized")]
    AlreadyInitialized,

    /// The viewer failed to deliver its node map
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PickerError>,
    },
}

impl PickerError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PickerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error must abort widget initialization
    pub fn is_fatal(&self) -> bool {
        match self {
            PickerError::Build(_) | PickerError::Viewer(_) => true,
            PickerError::WithContext { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for PickerError {
    fn from(err: serde_json::Error) -> Self {
        PickerError::Serialization(err.to_string())
    }
}

/// Result type alias for scene picker operations
pub type Result<T> = std::result::Result<T, PickerError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PickerError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PickerError::Config("missing scene root name".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing scene root name"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = PickerError::NotReady;
        let with_ctx = err.with_context("Failed to select option");
        assert!(with_ctx.to_string().contains("Failed to select option"));
        assert!(with_ctx.to_string().contains("not ready"));
    }

    #[test]
    fn test_fatal_classification() {
        let build = PickerError::Build(BuildError::NoSceneRoot {
            sentinel: "GLTF_SceneRootNode".to_string(),
        });
        assert!(build.is_fatal());
        assert!(build.with_context("startup").is_fatal());
        assert!(!PickerError::NotReady.is_fatal());
    }

    #[test]
    fn test_result_ext_converts_io_errors() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = res.context("reading node map").unwrap_err();
        assert!(matches!(err, PickerError::WithContext { .. }));
        assert!(err.to_string().starts_with("reading node map"));
    }
}
