//! Synchronous notifications from the gesture engine to the host.

/// Receives viewport changes as they happen.
///
/// Each method fires once, from inside the handler that caused the change,
/// after the whole `(zoom, pan)` update of that event has been applied.
pub trait GestureObserver {
    fn on_zoom_change(&mut self, _zoom: f64) {}

    fn on_pan_change(&mut self, _pan_x: f64, _pan_y: f64) {}

    fn on_panning_change(&mut self, _is_panning: bool) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGestureObserver;

impl GestureObserver for NoopGestureObserver {}
