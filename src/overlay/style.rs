//! Render configuration and per-item colour resolution.
//!
//! Styling is a pure function of the item, the interaction state and the
//! mode config. Nothing is written back to stored items, so a selection
//! change can never leave a stale highlight behind.

use super::item::OverlayItem;
use super::mode::DisplayModeConfig;
use crate::draw::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SELECTED_FILL: &str = "rgba(255, 0, 0, 0.3)";
pub const SELECTED_STROKE: &str = "red";
pub const HOVERED_FILL: &str = "rgba(255, 255, 0, 0.5)";
pub const HOVERED_STROKE: &str = "yellow";
/// Fill used when an item's colour cannot be turned into a translucent fill.
pub const FALLBACK_FILL: &str = "rgba(0, 123, 255, 0.15)";

/// Overlay drawing parameters.
///
/// Supplied by the host (or the `[render]` config section) and merged over
/// the defaults; the renderer never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderConfig {
    /// Resolution the annotation coordinates were captured at; coordinates are divided by it
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Border width, also used as the outward padding of every shape
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Alpha of the translucent fill derived from an item's hex colour (0.0 - 1.0)
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,

    /// Alpha applied to normal-state strokes (0.0 - 1.0)
    #[serde(default = "default_stroke_opacity")]
    pub stroke_opacity: f64,

    /// Border width of selected shapes
    #[serde(default = "default_highlight_stroke_width")]
    pub selected_stroke_width: f64,

    /// Border width of the hovered shape
    #[serde(default = "default_highlight_stroke_width")]
    pub hovered_stroke_width: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            stroke_width: default_stroke_width(),
            fill_opacity: default_fill_opacity(),
            stroke_opacity: default_stroke_opacity(),
            selected_stroke_width: default_highlight_stroke_width(),
            hovered_stroke_width: default_highlight_stroke_width(),
        }
    }
}

impl RenderConfig {
    /// Returns a copy with every field set in `patch` overriding this one.
    pub fn merged(&self, patch: &RenderConfigPatch) -> Self {
        Self {
            scale: patch.scale.unwrap_or(self.scale),
            stroke_width: patch.stroke_width.unwrap_or(self.stroke_width),
            fill_opacity: patch.fill_opacity.unwrap_or(self.fill_opacity),
            stroke_opacity: patch.stroke_opacity.unwrap_or(self.stroke_opacity),
            selected_stroke_width: patch
                .selected_stroke_width
                .unwrap_or(self.selected_stroke_width),
            hovered_stroke_width: patch
                .hovered_stroke_width
                .unwrap_or(self.hovered_stroke_width),
        }
    }
}

/// Partial render settings a host passes in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderConfigPatch {
    pub scale: Option<f64>,
    pub stroke_width: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub selected_stroke_width: Option<f64>,
    pub hovered_stroke_width: Option<f64>,
}

fn default_scale() -> f64 {
    2.0
}

fn default_stroke_width() -> f64 {
    1.5
}

fn default_fill_opacity() -> f64 {
    0.15
}

fn default_stroke_opacity() -> f64 {
    1.0
}

fn default_highlight_stroke_width() -> f64 {
    2.0
}

/// Which styling rule won for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Normal,
    Hovered,
    Selected,
}

/// CSS fill and stroke plus border width for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderColors {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub state: ItemState,
}

impl RenderColors {
    /// Fill as a drawable colour; unparseable strings become the fallback blue.
    pub fn fill_color(&self) -> Color {
        Color::parse_css(&self.fill).unwrap_or_else(fallback_fill_color)
    }

    /// Stroke as a drawable colour, with `stroke_opacity` applied to normal shapes.
    ///
    /// Returns `None` when the stroke string is not a colour (e.g. empty).
    pub fn stroke_color(&self, config: &RenderConfig) -> Option<Color> {
        let color = Color::parse_css(&self.stroke)?;
        Some(match self.state {
            ItemState::Normal => color.with_alpha(color.a * config.stroke_opacity),
            ItemState::Hovered | ItemState::Selected => color,
        })
    }
}

fn fallback_fill_color() -> Color {
    Color::from_rgb8(0, 123, 255, 0.15)
}

/// Resolves colours with the precedence selected, then hovered, then normal.
pub fn render_colors(
    item: &OverlayItem,
    mode: &DisplayModeConfig,
    config: &RenderConfig,
    state: ItemState,
) -> RenderColors {
    match state {
        ItemState::Selected => RenderColors {
            fill: SELECTED_FILL.to_string(),
            stroke: SELECTED_STROKE.to_string(),
            stroke_width: config.selected_stroke_width,
            state,
        },
        ItemState::Hovered => RenderColors {
            fill: HOVERED_FILL.to_string(),
            stroke: HOVERED_STROKE.to_string(),
            stroke_width: config.hovered_stroke_width,
            state,
        },
        ItemState::Normal => {
            let base = item
                .color
                .as_deref()
                .filter(|color| !color.is_empty())
                .unwrap_or(&mode.default_color);
            RenderColors {
                fill: translucent_fill(base, config.fill_opacity),
                stroke: base.to_string(),
                stroke_width: config.stroke_width,
                state,
            }
        }
    }
}

fn translucent_fill(base: &str, alpha: f64) -> String {
    if let Some(hex) = base.strip_prefix('#') {
        return hex_to_rgba(hex, alpha);
    }
    if base.contains("rgba") {
        return base.to_string();
    }
    FALLBACK_FILL.to_string()
}

/// Only `rrggbb` converts; any other hex form gets the fallback blue at `alpha`.
fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let rgb = if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        channel(0).zip(channel(2)).zip(channel(4))
    } else {
        None
    };
    match rgb {
        Some(((r, g), b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
        None => format!("rgba(0, 123, 255, {alpha})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::item::Coordinates;
    use crate::overlay::mode::{DisplayMode, DisplayModeRegistry};

    fn line_mode() -> DisplayModeConfig {
        DisplayModeRegistry::builtin()
            .get(DisplayMode::LineNumbers)
            .unwrap()
            .clone()
    }

    fn item() -> OverlayItem {
        OverlayItem::new("1", "L-1", Coordinates::default())
    }

    #[test]
    fn selected_beats_hovered_beats_normal() {
        let config = RenderConfig::default();
        let selected = render_colors(&item(), &line_mode(), &config, ItemState::Selected);
        assert_eq!(selected.fill, "rgba(255, 0, 0, 0.3)");
        assert_eq!(selected.stroke, "red");
        assert_eq!(selected.stroke_width, 2.0);

        let hovered = render_colors(&item(), &line_mode(), &config, ItemState::Hovered);
        assert_eq!(hovered.fill, "rgba(255, 255, 0, 0.5)");
        assert_eq!(hovered.stroke, "yellow");
    }

    #[test]
    fn normal_uses_mode_default_color() {
        let colors = render_colors(
            &item(),
            &line_mode(),
            &RenderConfig::default(),
            ItemState::Normal,
        );
        assert_eq!(colors.fill, "rgba(0, 123, 255, 0.15)");
        assert_eq!(colors.stroke, "#007bff");
        assert_eq!(colors.stroke_width, 1.5);
    }

    #[test]
    fn item_color_overrides_default() {
        let config = RenderConfig::default();
        let hex = render_colors(
            &item().with_color("#FF6B6B"),
            &line_mode(),
            &config,
            ItemState::Normal,
        );
        assert_eq!(hex.fill, "rgba(255, 107, 107, 0.15)");
        assert_eq!(hex.stroke, "#FF6B6B");

        let rgba = item().with_color("rgba(1, 2, 3, 0.4)");
        let colors = render_colors(&rgba, &line_mode(), &config, ItemState::Normal);
        assert_eq!(colors.fill, "rgba(1, 2, 3, 0.4)");
    }

    #[test]
    fn unconvertible_colors_fall_back_to_blue_fill() {
        let config = RenderConfig::default();
        for color in ["hsl(10, 70%, 60%)", "green", "#abc"] {
            let colors = render_colors(
                &item().with_color(color),
                &line_mode(),
                &config,
                ItemState::Normal,
            );
            assert_eq!(colors.fill, FALLBACK_FILL, "{color}");
            assert_eq!(colors.stroke, color);
        }
    }

    #[test]
    fn fill_opacity_feeds_hex_conversion() {
        let config = RenderConfig::default().merged(&RenderConfigPatch {
            fill_opacity: Some(0.5),
            ..RenderConfigPatch::default()
        });
        let colors = render_colors(
            &item().with_color("#000000"),
            &line_mode(),
            &config,
            ItemState::Normal,
        );
        assert_eq!(colors.fill, "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn signed_hex_digits_are_not_a_color() {
        let config = RenderConfig::default();
        let colors = render_colors(
            &item().with_color("#+1+2+3"),
            &line_mode(),
            &config,
            ItemState::Normal,
        );
        assert_eq!(colors.fill, "rgba(0, 123, 255, 0.15)");
        assert_eq!(colors.stroke, "#+1+2+3");
    }

    #[test]
    fn patch_only_overrides_given_fields() {
        let merged = RenderConfig::default().merged(&RenderConfigPatch {
            scale: Some(1.0),
            ..RenderConfigPatch::default()
        });
        assert_eq!(merged.scale, 1.0);
        assert_eq!(merged.stroke_width, 1.5);
        assert_eq!(merged.hovered_stroke_width, 2.0);
    }

    #[test]
    fn drawable_colors_apply_stroke_opacity() {
        let config = RenderConfig {
            stroke_opacity: 0.5,
            ..RenderConfig::default()
        };
        let normal = render_colors(&item(), &line_mode(), &config, ItemState::Normal);
        assert_eq!(normal.stroke_color(&config).unwrap().a, 0.5);
        assert!((normal.fill_color().a - 0.15).abs() < 1e-9);

        let selected = render_colors(&item(), &line_mode(), &config, ItemState::Selected);
        assert_eq!(selected.stroke_color(&config).unwrap().a, 1.0);
    }
}
