//! Input mode selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pointer device the user is driving the viewport with.
///
/// Exactly one mode is active at a time. Switching modes cancels any gesture
/// in progress but keeps the current zoom and pan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Wheel zooms around the cursor; secondary-button drag pans (default)
    #[default]
    Mouse,
    /// Pinch zooms, two-finger scroll pans, raw multi-touch is tracked
    Trackpad,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Trackpad => "trackpad",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mouse" => Ok(Self::Mouse),
            "trackpad" | "touchpad" => Ok(Self::Trackpad),
            other => Err(format!("unknown input mode '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_mode_is_mouse() {
        assert_eq!(InputMode::default(), InputMode::Mouse);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(InputMode::from_str("mouse").unwrap(), InputMode::Mouse);
        assert_eq!(InputMode::from_str("Trackpad").unwrap(), InputMode::Trackpad);
        assert_eq!(InputMode::from_str("TOUCHPAD").unwrap(), InputMode::Trackpad);
        assert!(InputMode::from_str("stylus").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [InputMode::Mouse, InputMode::Trackpad] {
            assert_eq!(InputMode::from_str(&mode.to_string()).unwrap(), mode);
        }
    }
}
