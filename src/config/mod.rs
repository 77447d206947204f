//! Configuration file support for pageframe.
//!
//! Settings are read from `~/.config/pageframe/config.toml`. They cover the
//! viewport (zoom range, gesture rates, startup input mode), overlay
//! rendering, and per-display-mode overrides.
//!
//! If no config file exists, defaults are used automatically.

pub mod types;

pub use types::{DisplayModeOverride, ViewportConfig};

use crate::input::GestureSettings;
use crate::overlay::{DisplayMode, DisplayModeRegistry, RenderConfig};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have defaults, so any section may be omitted.
///
/// # Example TOML
/// ```toml
/// [viewport]
/// zoom_min = 0.5
/// zoom_max = 2.0
/// input_mode = "trackpad"
///
/// [render]
/// scale = 2.0
/// stroke_width = 1.5
///
/// [modes.corrosion_loops]
/// default_color = "#aa0000"
///
/// [modes.equipment]
/// enabled = false
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Zoom range, gesture rates and startup input mode
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Overlay drawing parameters
    #[serde(default)]
    pub render: RenderConfig,

    /// Overrides keyed by display mode name (line_numbers, ocr_results,
    /// corrosion_loops, equipment, clean)
    #[serde(default)]
    pub modes: BTreeMap<String, DisplayModeOverride>,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are replaced with the nearest valid value (or the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `zoom_min`: > 0, and not above `zoom_max`
    /// - gesture rates, `pan_threshold`, `zoom_step`: > 0 (threshold may be 0)
    /// - `render.scale`: > 0
    /// - stroke widths: >= 0
    /// - opacities: 0.0 - 1.0
    /// - `modes` keys: known display modes only
    pub fn validate_and_clamp(&mut self) {
        let defaults = ViewportConfig::default();
        let viewport = &mut self.viewport;

        if !(viewport.zoom_min.is_finite() && viewport.zoom_min > 0.0) {
            warn!(
                "Invalid zoom_min {}, using {}",
                viewport.zoom_min, defaults.zoom_min
            );
            viewport.zoom_min = defaults.zoom_min;
        }
        if !viewport.zoom_max.is_finite() {
            warn!(
                "Invalid zoom_max {}, using {}",
                viewport.zoom_max, defaults.zoom_max
            );
            viewport.zoom_max = defaults.zoom_max;
        }
        if viewport.zoom_min > viewport.zoom_max {
            warn!(
                "zoom_min {:.2} exceeds zoom_max {:.2}, swapping",
                viewport.zoom_min, viewport.zoom_max
            );
            std::mem::swap(&mut viewport.zoom_min, &mut viewport.zoom_max);
        }

        for (name, value, fallback) in [
            ("mouse_zoom_rate", &mut viewport.mouse_zoom_rate, defaults.mouse_zoom_rate),
            (
                "trackpad_zoom_rate",
                &mut viewport.trackpad_zoom_rate,
                defaults.trackpad_zoom_rate,
            ),
            (
                "trackpad_pan_rate",
                &mut viewport.trackpad_pan_rate,
                defaults.trackpad_pan_rate,
            ),
            ("zoom_step", &mut viewport.zoom_step, defaults.zoom_step),
        ] {
            if !(value.is_finite() && *value > 0.0) {
                warn!("Invalid {name} {value}, using {fallback}");
                *value = fallback;
            }
        }

        if !(viewport.pan_threshold.is_finite() && viewport.pan_threshold >= 0.0) {
            warn!(
                "Invalid pan_threshold {}, using {}",
                viewport.pan_threshold, defaults.pan_threshold
            );
            viewport.pan_threshold = defaults.pan_threshold;
        }

        let render_defaults = RenderConfig::default();
        let render = &mut self.render;
        if !(render.scale.is_finite() && render.scale > 0.0) {
            warn!(
                "Invalid render scale {}, using {}",
                render.scale, render_defaults.scale
            );
            render.scale = render_defaults.scale;
        }

        for (name, value, fallback) in [
            ("stroke_width", &mut render.stroke_width, render_defaults.stroke_width),
            (
                "selected_stroke_width",
                &mut render.selected_stroke_width,
                render_defaults.selected_stroke_width,
            ),
            (
                "hovered_stroke_width",
                &mut render.hovered_stroke_width,
                render_defaults.hovered_stroke_width,
            ),
        ] {
            if !value.is_finite() {
                warn!("Invalid {name} {value}, using {fallback}");
                *value = fallback;
            } else if *value < 0.0 {
                warn!("Negative {name} {value:.2}, clamping to 0.0");
                *value = 0.0;
            }
        }

        for (name, value) in [
            ("fill_opacity", &mut render.fill_opacity),
            ("stroke_opacity", &mut render.stroke_opacity),
        ] {
            if !(0.0..=1.0).contains(&*value) {
                warn!("Invalid {name} {value:.3}, clamping to 0.0-1.0");
                *value = if value.is_nan() { 1.0 } else { value.clamp(0.0, 1.0) };
            }
        }

        self.modes.retain(|name, _| {
            let known = name.parse::<DisplayMode>().is_ok();
            if !known {
                warn!("Ignoring overrides for unknown display mode '{name}'");
            }
            known
        });
    }

    /// Gesture engine tuning derived from the `[viewport]` section.
    pub fn gesture_settings(&self) -> GestureSettings {
        GestureSettings::from(&self.viewport)
    }

    /// Built-in display modes with the `[modes.*]` overrides applied.
    pub fn display_modes(&self) -> DisplayModeRegistry {
        let mut registry = DisplayModeRegistry::builtin();
        for (name, overrides) in &self.modes {
            let Ok(mode) = name.parse::<DisplayMode>() else {
                continue;
            };
            if !overrides.enabled {
                registry.remove(mode);
                continue;
            }
            if let Some(entry) = registry.get_mut(mode) {
                overrides.apply_to(entry);
            }
        }
        registry
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/pageframe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pageframe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputMode;
    use std::io::Write;

    fn parse(toml_str: &str) -> Config {
        let mut config: Config = toml::from_str(toml_str).unwrap();
        config.validate_and_clamp();
        config
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse(""), Config::default());
        let settings = Config::default().gesture_settings();
        assert_eq!(settings, GestureSettings::default());
    }

    #[test]
    fn viewport_section_feeds_gesture_settings() {
        let config = parse(
            r#"
            [viewport]
            zoom_min = 0.5
            zoom_max = 2.0
            input_mode = "trackpad"
            zoom_step = 0.25
            "#,
        );
        let settings = config.gesture_settings();
        assert_eq!(settings.bounds.min(), 0.5);
        assert_eq!(settings.bounds.max(), 2.0);
        assert_eq!(settings.input_mode, InputMode::Trackpad);
        assert_eq!(settings.zoom_step, 0.25);
        assert_eq!(settings.mouse_zoom_rate, 0.001);
    }

    #[test]
    fn out_of_range_values_are_fixed() {
        let config = parse(
            r#"
            [viewport]
            zoom_min = 4.0
            zoom_max = 0.5
            mouse_zoom_rate = -1.0
            pan_threshold = -3.0

            [render]
            scale = 0.0
            stroke_width = -2.0
            fill_opacity = 1.5
            stroke_opacity = -0.5
            "#,
        );
        assert_eq!(config.viewport.zoom_min, 0.5);
        assert_eq!(config.viewport.zoom_max, 4.0);
        assert_eq!(config.viewport.mouse_zoom_rate, 0.001);
        assert_eq!(config.viewport.pan_threshold, 5.0);
        assert_eq!(config.render.scale, 2.0);
        assert_eq!(config.render.stroke_width, 0.0);
        assert_eq!(config.render.fill_opacity, 1.0);
        assert_eq!(config.render.stroke_opacity, 0.0);
    }

    #[test]
    fn mode_overrides_apply_and_remove() {
        let config = parse(
            r##"
            [modes.corrosion_loops]
            default_color = "#aa0000"
            enable_hover = false

            [modes.equipment]
            enabled = false

            [modes.pipes]
            title = "Pipes"
            "##,
        );
        assert!(!config.modes.contains_key("pipes"));

        let registry = config.display_modes();
        let loops = registry.get(DisplayMode::CorrosionLoops).unwrap();
        assert_eq!(loops.default_color, "#aa0000");
        assert!(!loops.enable_hover);
        assert!(loops.show_grouping);
        assert!(registry.get(DisplayMode::Equipment).is_err());
        assert!(registry.contains(DisplayMode::LineNumbers));
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nstroke_width = 3.0").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.render.stroke_width, 3.0);
        assert_eq!(config.render.scale, 2.0);
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[viewport\nzoom_min = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema.get("properties").unwrap();
        for section in ["viewport", "render", "modes"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
