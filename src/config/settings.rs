//! Presentation-facing settings carried by the picker configuration
//!
//! These settings never influence selection state. They describe how the
//! host should animate things: how long the option panel's close transition
//! takes before new content may be shown, and how the translate passthrough
//! asks the viewer to move a node.
//!
//! # Main Types
//!
//! - [`PanelSettings`] - Option panel transition timing
//! - [`TranslateSettings`] - Duration and easing forwarded with translate calls
//! - [`Easing`] - Easing curves understood by the viewer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default close-transition duration of the option panel, in milliseconds
pub const DEFAULT_PANEL_TRANSITION_MS: u64 = 300;

/// Default duration of a translate animation, in seconds
pub const DEFAULT_TRANSLATE_DURATION_SECS: f64 = 1.0;

/// Option panel timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Duration of the panel close transition in milliseconds.
    ///
    /// When the user switches from one type's panel to another's, the new
    /// panel is opened this long after the old one starts closing.
    #[serde(default = "default_panel_transition_ms")]
    pub transition_ms: u64,
}

fn default_panel_transition_ms() -> u64 {
    DEFAULT_PANEL_TRANSITION_MS
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            transition_ms: DEFAULT_PANEL_TRANSITION_MS,
        }
    }
}

impl PanelSettings {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Easing curves accepted by the viewer's translate call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInQuad,
    #[default]
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Name used on the viewer wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInQuad => "easeInQuad",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseInCubic => "easeInCubic",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
        }
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options forwarded with every translate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateSettings {
    /// Animation duration in seconds
    #[serde(default = "default_translate_duration")]
    pub duration_secs: f64,

    /// Easing curve
    #[serde(default)]
    pub easing: Easing,
}

fn default_translate_duration() -> f64 {
    DEFAULT_TRANSLATE_DURATION_SECS
}

impl Default for TranslateSettings {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_TRANSLATE_DURATION_SECS,
            easing: Easing::default(),
        }
    }
}

impl TranslateSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs.max(0.0))
    }
}
