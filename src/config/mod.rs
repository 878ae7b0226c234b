//! Configuration module for the scene picker
//!
//! This module handles picker configuration including:
//! - The naming-convention constants (scene root sentinel, filter marker,
//!   suffix delimiter) handed to [`NameGrammar`](crate::grammar::NameGrammar)
//! - Presentation timing ([`PanelSettings`]) and translate options
//!   ([`TranslateSettings`])
//!
//! # File Formats
//!
//! Configuration files are TOML (`.toml`) or JSON (anything else). Every
//! field has a default, so a partial file only overrides what it names:
//!
//! ```toml
//! model_uid = "3464d838341c4b299d89cd427065738d"
//! scene_root_name = "GLTF_SceneRootNode"
//!
//! [panel]
//! transition_ms = 450
//! ```
//!
//! # Example
//!
//! ```ignore
//! use scene_picker::config::PickerConfig;
//!
//! let config = PickerConfig::load_or_default("picker.toml");
//! let grammar = NameGrammar::from_config(&config);
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{PickerError, Result, ResultExt};
use crate::grammar::{DEFAULT_FILTER_MARKER, DEFAULT_SUFFIX_DELIMITER};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Name of the top-level container node the viewer exposes
pub const DEFAULT_SCENE_ROOT_NAME: &str = "GLTF_SceneRootNode";

/// Extension selecting the TOML format
pub const TOML_EXTENSION: &str = "toml";

/// Picker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    /// Viewer model identifier the widget embeds
    #[serde(default)]
    pub model_uid: Option<String>,

    /// Raw name of the scene root node
    #[serde(default = "default_scene_root_name")]
    pub scene_root_name: String,

    /// Token marking the filter group and an option's tag list
    #[serde(default = "default_filter_marker")]
    pub filter_marker: String,

    /// Delimiter of the viewer-appended disambiguation suffix
    #[serde(default = "default_suffix_delimiter")]
    pub suffix_delimiter: char,

    /// Option panel timing
    #[serde(default)]
    pub panel: PanelSettings,

    /// Options forwarded with translate calls
    #[serde(default)]
    pub translate: TranslateSettings,
}

fn default_config_version() -> u32 {
    1
}

fn default_scene_root_name() -> String {
    DEFAULT_SCENE_ROOT_NAME.to_string()
}

fn default_filter_marker() -> String {
    DEFAULT_FILTER_MARKER.to_string()
}

fn default_suffix_delimiter() -> char {
    DEFAULT_SUFFIX_DELIMITER
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            model_uid: None,
            scene_root_name: default_scene_root_name(),
            filter_marker: default_filter_marker(),
            suffix_delimiter: default_suffix_delimiter(),
            panel: PanelSettings::default(),
            translate: TranslateSettings::default(),
        }
    }
}

impl PickerConfig {
    /// Create a config for a specific model
    pub fn for_model(model_uid: impl Into<String>) -> Self {
        Self {
            model_uid: Some(model_uid.into()),
            ..Default::default()
        }
    }

    /// Close-transition duration of the option panel
    pub fn panel_transition(&self) -> Duration {
        self.panel.transition()
    }

    /// Check that the naming constants can actually be parsed against.
    pub fn validate(&self) -> Result<()> {
        if self.scene_root_name.trim().is_empty() {
            return Err(PickerError::Config(
                "scene_root_name must not be empty".to_string(),
            ));
        }

        if self.filter_marker.is_empty() || self.filter_marker.chars().any(char::is_whitespace) {
            return Err(PickerError::Config(format!(
                "filter_marker {:?} must be a single non-empty token",
                self.filter_marker
            )));
        }

        if self.suffix_delimiter.is_whitespace() {
            return Err(PickerError::Config(
                "suffix_delimiter must not be whitespace".to_string(),
            ));
        }

        if self.filter_marker.contains(self.suffix_delimiter) {
            return Err(PickerError::Config(format!(
                "filter_marker {:?} must not contain the suffix delimiter {:?}",
                self.filter_marker, self.suffix_delimiter
            )));
        }

        Ok(())
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PickerError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Parse a config from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| PickerError::Config(format!("Failed to parse JSON config: {}", e)))
    }

    /// Load and validate a config file; the format follows the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config = if is_toml(path) {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .with_context(|| format!("{:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Load a config file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load picker config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = if is_toml(path) {
            toml::to_string_pretty(self)
                .map_err(|e| PickerError::Config(format!("Failed to serialize config: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| PickerError::Config(format!("Failed to serialize config: {}", e)))?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {:?}", path))
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TOML_EXTENSION))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = PickerConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.scene_root_name, "GLTF_SceneRootNode");
        assert_eq!(config.filter_marker, "#");
        assert_eq!(config.suffix_delimiter, '_');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PickerConfig::from_toml_str(
            r#"
            model_uid = "abc123"

            [panel]
            transition_ms = 450
            "#,
        )
        .unwrap();

        assert_eq!(config.model_uid.as_deref(), Some("abc123"));
        assert_eq!(config.panel_transition(), Duration::from_millis(450));
        assert_eq!(config.scene_root_name, DEFAULT_SCENE_ROOT_NAME);
        assert_eq!(config.translate, TranslateSettings::default());
    }

    #[test]
    fn test_json_config() {
        let config = PickerConfig::from_json_str(
            r#"{ "filter_marker": "@", "translate": { "easing": "linear" } }"#,
        )
        .unwrap();

        assert_eq!(config.filter_marker, "@");
        assert_eq!(config.translate.easing, Easing::Linear);
        assert_eq!(config.translate.duration_secs, 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_marker() {
        let mut config = PickerConfig::default();
        config.filter_marker = "# #".to_string();
        assert!(config.validate().is_err());

        config.filter_marker = "a_b".to_string();
        assert!(config.validate().is_err());

        config.filter_marker = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_root_and_delimiter() {
        let mut config = PickerConfig::default();
        config.scene_root_name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = PickerConfig::default();
        config.suffix_delimiter = ' ';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.toml");

        let mut config = PickerConfig::for_model("3464d838");
        config.panel.transition_ms = 120;
        config.save(&path).unwrap();

        let loaded = PickerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.json");

        let config = PickerConfig::for_model("model");
        config.save(&path).unwrap();
        assert_eq!(PickerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = PickerConfig::load_or_default("/definitely/not/here.toml");
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn test_load_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PickerConfig::load(dir.path().join("absent.toml")).unwrap_err();

        match err {
            PickerError::WithContext { context, source } => {
                assert!(context.contains("absent.toml"));
                assert!(matches!(*source, PickerError::Io(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "panel = 3").unwrap();

        let err = PickerConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
        assert!(err.to_string().contains("TOML"));
    }
}
