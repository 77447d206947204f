//! Pan/zoom viewport state.
//!
//! The viewport is a translation followed by a uniform scale, with the origin
//! at the frame's top-left corner. A document-layer point `(x, y)` lands on
//! screen at `(pan_x + x * zoom, pan_y + y * zoom)`.
//!
//! Every zoom mutation goes through [`Viewport::zoom_to_around`], which keeps
//! a chosen screen point visually fixed and updates pan and zoom together so
//! no caller ever observes a half-applied transform.

use crate::util;
use thiserror::Error;

/// Errors raised by viewport mutations.
#[derive(Debug, Error, PartialEq)]
pub enum ViewportError {
    #[error("invalid zoom bounds {min}..={max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("non-finite viewport input")]
    NonFinite,
}

/// Inclusive zoom range shared by every zoom path (wheel, pinch, buttons).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f64,
    max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

impl ZoomBounds {
    /// Creates a bound, rejecting non-positive, inverted, or non-finite ranges.
    pub fn new(min: f64, max: f64) -> Result<Self, ViewportError> {
        if !util::all_finite(&[min, max]) || min <= 0.0 || min > max {
            return Err(ViewportError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// The tighter 0.5-2.0 range some hosts use.
    pub fn narrow() -> Self {
        Self { min: 0.5, max: 2.0 }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps a requested zoom to the nearest bound.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// CSS-equivalent transform derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Transform {
    /// Maps a document-layer point to screen space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.translate_x + x * self.scale,
            self.translate_y + y * self.scale,
        )
    }

    /// Maps a screen point back into document-layer space.
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.translate_x) / self.scale,
            (y - self.translate_y) / self.scale,
        )
    }

    /// Formats the transform for a wrapper element with `transform-origin: 0 0`.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Zoom factor and pan offset for the document surface and overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    bounds: ZoomBounds,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl Viewport {
    /// Creates a viewport at zoom 1 with no pan.
    ///
    /// Zoom 1 is clamped into `bounds` for hosts whose range excludes it.
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            zoom: bounds.clamp(1.0),
            pan_x: 0.0,
            pan_y: 0.0,
            bounds,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// Zoom as a rounded percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Replaces the active bound and re-clamps the current zoom into it.
    pub fn set_bounds(&mut self, bounds: ZoomBounds) {
        self.bounds = bounds;
        self.zoom = bounds.clamp(self.zoom);
    }

    /// Sets zoom directly (clamped) without adjusting pan.
    ///
    /// Anchor is the frame origin; used by button-driven zoom.
    pub fn set_zoom(&mut self, value: f64) -> Result<(), ViewportError> {
        if !value.is_finite() {
            return Err(ViewportError::NonFinite);
        }
        self.zoom = self.bounds.clamp(value);
        Ok(())
    }

    /// Sets the pan offset. Pan is never clamped.
    pub fn set_pan(&mut self, x: f64, y: f64) -> Result<(), ViewportError> {
        if !util::all_finite(&[x, y]) {
            return Err(ViewportError::NonFinite);
        }
        self.pan_x = x;
        self.pan_y = y;
        Ok(())
    }

    /// Shifts the pan offset by a screen-space delta.
    pub fn translate_by(&mut self, dx: f64, dy: f64) -> Result<(), ViewportError> {
        if !util::all_finite(&[dx, dy]) {
            return Err(ViewportError::NonFinite);
        }
        self.pan_x += dx;
        self.pan_y += dy;
        Ok(())
    }

    /// Changes zoom by `delta` while keeping screen point `(cx, cy)` fixed.
    pub fn zoom_around(&mut self, delta: f64, cx: f64, cy: f64) -> Result<(), ViewportError> {
        if !delta.is_finite() {
            return Err(ViewportError::NonFinite);
        }
        self.zoom_to_around(self.zoom + delta, cx, cy)
    }

    /// Moves to zoom `target` (clamped) while keeping screen point `(cx, cy)` fixed.
    pub fn zoom_to_around(&mut self, target: f64, cx: f64, cy: f64) -> Result<(), ViewportError> {
        if !util::all_finite(&[target, cx, cy]) {
            return Err(ViewportError::NonFinite);
        }
        let new_zoom = self.bounds.clamp(target);
        let factor = new_zoom / self.zoom;
        self.pan_x = cx - (cx - self.pan_x) * factor;
        self.pan_y = cy - (cy - self.pan_y) * factor;
        self.zoom = new_zoom;
        Ok(())
    }

    /// Restores zoom 1 (clamped) and pan (0, 0). Bounds are kept.
    pub fn reset(&mut self) {
        self.zoom = self.bounds.clamp(1.0);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Current transform for the wrapper around the host surface.
    pub fn transform(&self) -> Transform {
        Transform {
            translate_x: self.pan_x,
            translate_y: self.pan_y,
            scale: self.zoom,
        }
    }
}
