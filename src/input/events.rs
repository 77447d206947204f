//! Generic input event types for host-independent gesture handling.
//!
//! All coordinates are client (window) coordinates. The engine converts them
//! to frame-local coordinates using the frame origin reported by the host.

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary; reserved for overlay clicks)
    Left,
    /// Right mouse button (secondary; drag-pans in mouse mode)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}

/// A wheel or two-finger scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Pointer X in client coordinates
    pub x: f64,
    /// Pointer Y in client coordinates
    pub y: f64,
    /// Horizontal scroll delta
    pub delta_x: f64,
    /// Vertical scroll delta (negative = away from the user)
    pub delta_y: f64,
    /// Platform flag for a precise pinch (reported as ctrl+wheel by browsers)
    pub precise_pinch: bool,
}

impl WheelEvent {
    /// Vertical-only wheel event, as produced by a notched mouse wheel.
    pub fn vertical(x: f64, y: f64, delta_y: f64) -> Self {
        Self {
            x,
            y,
            delta_x: 0.0,
            delta_y,
            precise_pinch: false,
        }
    }

    /// Trackpad pinch reported through the wheel channel.
    pub fn pinch(x: f64, y: f64, delta_y: f64) -> Self {
        Self {
            precise_pinch: true,
            ..Self::vertical(x, y, delta_y)
        }
    }

    /// Two-finger trackpad scroll.
    pub fn scroll(x: f64, y: f64, delta_x: f64, delta_y: f64) -> Self {
        Self {
            x,
            y,
            delta_x,
            delta_y,
            precise_pinch: false,
        }
    }
}

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
