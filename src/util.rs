//! Utility functions for color names and touch geometry.
//!
//! This module provides:
//! - Name-to-color mapping for CSS named colors (constants live in draw::color)
//! - Distance and midpoint helpers for multi-touch gestures

use crate::draw::{Color, color::*};
use crate::input::TouchPoint;

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used when resolving CSS color strings that are neither hex nor functional
/// notation.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black", "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Touch Geometry
// ============================================================================

/// Euclidean distance between two contact points.
pub fn touch_distance(a: TouchPoint, b: TouchPoint) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Midpoint between two contact points.
pub fn touch_center(a: TouchPoint, b: TouchPoint) -> (f64, f64) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Returns true when every value is finite (not NaN or infinite).
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(name_to_color("RED").unwrap(), RED);
        assert_eq!(name_to_color("yellow").unwrap(), YELLOW);
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn distance_and_center_of_two_touches() {
        let a = TouchPoint::new(0.0, 0.0);
        let b = TouchPoint::new(30.0, 40.0);
        assert_eq!(touch_distance(a, b), 50.0);
        assert_eq!(touch_center(a, b), (15.0, 20.0));
    }

    #[test]
    fn finite_check_rejects_nan_and_infinity() {
        assert!(all_finite(&[1.0, -2.5, 0.0]));
        assert!(!all_finite(&[1.0, f64::NAN]));
        assert!(!all_finite(&[f64::INFINITY]));
    }
}
