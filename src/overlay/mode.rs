//! Display modes and the registry that describes how each one renders.

use super::OverlayError;
use log::{debug, error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which family of overlay items the document view is showing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    LineNumbers,
    OcrResults,
    CorrosionLoops,
    Equipment,
    Clean,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 5] = [
        DisplayMode::LineNumbers,
        DisplayMode::OcrResults,
        DisplayMode::CorrosionLoops,
        DisplayMode::Equipment,
        DisplayMode::Clean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::LineNumbers => "line_numbers",
            DisplayMode::OcrResults => "ocr_results",
            DisplayMode::CorrosionLoops => "corrosion_loops",
            DisplayMode::Equipment => "equipment",
            DisplayMode::Clean => "clean",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| format!("unknown display mode '{value}'"))
    }
}

/// How one display mode renders and reacts to the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModeConfig {
    pub title: String,
    pub description: String,
    /// Colour for items that carry none of their own; empty for modes that draw nothing
    pub default_color: String,
    /// Run the group colour pass and select whole groups on click
    pub show_grouping: bool,
    pub enable_selection: bool,
    pub enable_hover: bool,
}

impl DisplayModeConfig {
    fn builtin(mode: DisplayMode) -> Self {
        let (title, description, default_color, show_grouping, interactive) = match mode {
            DisplayMode::LineNumbers => (
                "Line Numbers",
                "Display piping line numbers",
                "#007bff",
                false,
                true,
            ),
            DisplayMode::OcrResults => (
                "OCR Results",
                "Display raw OCR text recognition results",
                "#28a745",
                false,
                true,
            ),
            DisplayMode::CorrosionLoops => (
                "Corrosion Loops",
                "Display grouped corrosion loops with color coding",
                "#dc3545",
                true,
                true,
            ),
            DisplayMode::Equipment => (
                "Equipment",
                "Display equipment items",
                "#ffc107",
                false,
                true,
            ),
            DisplayMode::Clean => (
                "Clean PDF",
                "Display PDF without any overlays",
                "",
                false,
                false,
            ),
        };

        Self {
            title: title.to_string(),
            description: description.to_string(),
            default_color: default_color.to_string(),
            show_grouping,
            enable_selection: interactive,
            enable_hover: interactive,
        }
    }

    /// Whether clicks or hover can change interaction state in this mode.
    pub fn is_interactive(&self) -> bool {
        self.enable_selection || self.enable_hover
    }
}

/// Mode to config lookup. Missing entries are an error, never a silent fallback.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayModeRegistry {
    modes: BTreeMap<DisplayMode, DisplayModeConfig>,
}

impl DisplayModeRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every built-in mode.
    pub fn builtin() -> Self {
        let modes = DisplayMode::ALL
            .into_iter()
            .map(|mode| (mode, DisplayModeConfig::builtin(mode)))
            .collect();
        Self { modes }
    }

    /// Looks up a mode's config.
    ///
    /// # Errors
    /// [`OverlayError::UnknownDisplayMode`] when the mode has no entry.
    pub fn get(&self, mode: DisplayMode) -> Result<&DisplayModeConfig, OverlayError> {
        self.find(mode).ok_or_else(|| {
            error!("No display mode registered for \"{mode}\"");
            OverlayError::UnknownDisplayMode(mode)
        })
    }

    /// Lookup without the error diagnostic, for callers probing optional behavior.
    pub fn find(&self, mode: DisplayMode) -> Option<&DisplayModeConfig> {
        self.modes.get(&mode)
    }

    pub fn get_mut(&mut self, mode: DisplayMode) -> Option<&mut DisplayModeConfig> {
        self.modes.get_mut(&mode)
    }

    /// Adds or replaces an entry, returning the previous one.
    pub fn register(
        &mut self,
        mode: DisplayMode,
        config: DisplayModeConfig,
    ) -> Option<DisplayModeConfig> {
        debug!("Registering display mode {mode}");
        self.modes.insert(mode, config)
    }

    pub fn remove(&mut self, mode: DisplayMode) -> Option<DisplayModeConfig> {
        debug!("Removing display mode {mode}");
        self.modes.remove(&mode)
    }

    pub fn contains(&self, mode: DisplayMode) -> bool {
        self.modes.contains_key(&mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DisplayMode, &DisplayModeConfig)> {
        self.modes.iter().map(|(mode, config)| (*mode, config))
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_covers_every_mode() {
        let registry = DisplayModeRegistry::builtin();
        assert_eq!(registry.len(), DisplayMode::ALL.len());

        let loops = registry.get(DisplayMode::CorrosionLoops).unwrap();
        assert!(loops.show_grouping);
        assert_eq!(loops.default_color, "#dc3545");

        let clean = registry.get(DisplayMode::Clean).unwrap();
        assert_eq!(clean.default_color, "");
        assert!(!clean.is_interactive());
    }

    #[test]
    fn missing_mode_is_an_error() {
        let mut registry = DisplayModeRegistry::builtin();
        registry.remove(DisplayMode::Equipment);
        let err = registry.get(DisplayMode::Equipment).unwrap_err();
        assert!(matches!(err, OverlayError::UnknownDisplayMode(DisplayMode::Equipment)));
        assert!(DisplayModeRegistry::empty().get(DisplayMode::Clean).is_err());
    }

    #[test]
    fn register_replaces_entry() {
        let mut registry = DisplayModeRegistry::builtin();
        let mut custom = registry.get(DisplayMode::Equipment).unwrap().clone();
        custom.show_grouping = true;
        let previous = registry.register(DisplayMode::Equipment, custom);
        assert!(previous.is_some_and(|old| !old.show_grouping));
        assert!(registry.get(DisplayMode::Equipment).unwrap().show_grouping);
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!("corrosion_loops".parse(), Ok(DisplayMode::CorrosionLoops));
        assert_eq!("OCR-Results".parse(), Ok(DisplayMode::OcrResults));
        assert!("annotations".parse::<DisplayMode>().is_err());
        for mode in DisplayMode::ALL {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }
}
