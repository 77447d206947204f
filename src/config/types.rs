//! Configuration type definitions.

use crate::input::InputMode;
use crate::overlay::DisplayModeConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pan/zoom behavior.
///
/// Every zoom path (wheel, pinch, buttons) clamps against the same
/// `zoom_min..=zoom_max` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewportConfig {
    /// Smallest allowed zoom factor (must be positive)
    #[serde(default = "default_zoom_min")]
    pub zoom_min: f64,

    /// Largest allowed zoom factor
    #[serde(default = "default_zoom_max")]
    pub zoom_max: f64,

    /// Zoom change per wheel delta unit in mouse mode
    #[serde(default = "default_mouse_zoom_rate")]
    pub mouse_zoom_rate: f64,

    /// Zoom change per wheel delta unit for a trackpad pinch
    #[serde(default = "default_trackpad_zoom_rate")]
    pub trackpad_zoom_rate: f64,

    /// Pan distance per wheel delta unit for a two-finger trackpad scroll
    #[serde(default = "default_trackpad_pan_rate")]
    pub trackpad_pan_rate: f64,

    /// Midpoint drift (in pixels) before a two-finger touch starts panning
    #[serde(default = "default_pan_threshold")]
    pub pan_threshold: f64,

    /// Zoom change applied by the zoom-in/zoom-out commands
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Input mode at startup (mouse, trackpad)
    #[serde(default)]
    pub input_mode: InputMode,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_min: default_zoom_min(),
            zoom_max: default_zoom_max(),
            mouse_zoom_rate: default_mouse_zoom_rate(),
            trackpad_zoom_rate: default_trackpad_zoom_rate(),
            trackpad_pan_rate: default_trackpad_pan_rate(),
            pan_threshold: default_pan_threshold(),
            zoom_step: default_zoom_step(),
            input_mode: InputMode::default(),
        }
    }
}

/// Per-mode changes layered over a built-in display mode.
///
/// Unset fields keep the built-in value. `enabled = false` removes the mode,
/// after which selecting it is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DisplayModeOverride {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// CSS colour for items without their own colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grouping: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_selection: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_hover: Option<bool>,
}

impl Default for DisplayModeOverride {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            title: None,
            description: None,
            default_color: None,
            show_grouping: None,
            enable_selection: None,
            enable_hover: None,
        }
    }
}

impl DisplayModeOverride {
    /// Writes every set field into `target`.
    pub fn apply_to(&self, target: &mut DisplayModeConfig) {
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(description) = &self.description {
            target.description = description.clone();
        }
        if let Some(color) = &self.default_color {
            target.default_color = color.clone();
        }
        if let Some(value) = self.show_grouping {
            target.show_grouping = value;
        }
        if let Some(value) = self.enable_selection {
            target.enable_selection = value;
        }
        if let Some(value) = self.enable_hover {
            target.enable_hover = value;
        }
    }
}

fn default_zoom_min() -> f64 {
    0.1
}

fn default_zoom_max() -> f64 {
    5.0
}

fn default_mouse_zoom_rate() -> f64 {
    0.001
}

fn default_trackpad_zoom_rate() -> f64 {
    0.003
}

fn default_trackpad_pan_rate() -> f64 {
    1.5
}

fn default_pan_threshold() -> f64 {
    5.0
}

fn default_zoom_step() -> f64 {
    0.1
}

fn default_enabled() -> bool {
    true
}
