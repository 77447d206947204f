//! Mapping from annotation-source coordinates to overlay-layer rectangles.

use super::item::Coordinates;

/// Axis-aligned rectangle in overlay-layer (document-pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    /// Whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Converts source coordinates to a layer rectangle.
///
/// `source_scale` is the resolution the annotations were captured at and
/// `page_scale` the host's current page-render scale; the two are kept apart
/// because they vary independently. `padding` grows the rectangle outward on
/// every side so its stroke is never clipped.
pub fn adjusted_coordinates(
    coords: &Coordinates,
    source_scale: f64,
    page_scale: f64,
    padding: f64,
) -> ScreenRect {
    let scale = |value: f64| (value / source_scale) * page_scale;
    ScreenRect {
        x: scale(coords.x) - padding,
        y: scale(coords.y) - padding,
        width: scale(coords.width) + padding * 2.0,
        height: scale(coords.height) + padding * 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_by_source_and_multiplies_by_page_scale() {
        let coords = Coordinates::new(200.0, 100.0, 40.0, 20.0);
        let rect = adjusted_coordinates(&coords, 2.0, 1.5, 1.5);
        assert_eq!(
            rect,
            ScreenRect {
                x: 148.5,
                y: 73.5,
                width: 33.0,
                height: 18.0,
            }
        );
    }

    #[test]
    fn zero_padding_keeps_extent() {
        let coords = Coordinates::new(10.0, 10.0, 10.0, 10.0);
        let rect = adjusted_coordinates(&coords, 1.0, 1.0, 0.0);
        assert_eq!(rect.width, 10.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(20.1, 15.0));
    }
}
