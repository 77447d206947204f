use crate::input::listeners::ListenerKind;
use crate::input::mode::InputMode;
use crate::viewport::ZoomBounds;
use log::info;

use super::core::ensure_finite;
use super::{GestureEngine, GestureState};

impl GestureEngine {
    /// Zooms in by one step.
    ///
    /// Button zoom has no pointer anchor: the document origin stays where it
    /// is on screen, so the pan offset is unchanged.
    pub fn zoom_in(&mut self) {
        self.step_zoom(self.settings.zoom_step);
    }

    /// Zooms out by one step. See [`GestureEngine::zoom_in`].
    pub fn zoom_out(&mut self) {
        self.step_zoom(-self.settings.zoom_step);
    }

    /// Restores zoom 1 and pan (0, 0).
    pub fn reset_zoom(&mut self) {
        self.dispatch("reset", |engine| {
            engine.viewport.reset();
            Ok(())
        });
    }

    /// Jumps straight to a zoom and pan, e.g. when the host restores a saved view.
    ///
    /// Zoom is clamped to the active bound; pan is taken as given.
    pub fn restore_view(&mut self, zoom: f64, pan_x: f64, pan_y: f64) {
        self.dispatch("restore view", |engine| {
            ensure_finite("restore view", &[zoom, pan_x, pan_y])?;
            engine.viewport.set_zoom(zoom)?;
            engine.viewport.set_pan(pan_x, pan_y)?;
            Ok(())
        });
    }

    /// Replaces the zoom bound used by every zoom path and re-clamps the current zoom.
    pub fn set_zoom_bounds(&mut self, bounds: ZoomBounds) {
        self.settings.bounds = bounds;
        self.dispatch("zoom bounds", |engine| {
            engine.viewport.set_bounds(bounds);
            Ok(())
        });
    }

    /// Switches input mode.
    ///
    /// Cancels any pan or pinch in progress and swaps the mode-specific host
    /// listeners (old ones released before new ones are registered). Zoom and
    /// pan are preserved.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        let current = self.input_mode();
        if current == mode {
            return;
        }
        self.dispatch("input mode", |engine| {
            engine.end_drag_pan();
            engine.state = GestureState::for_mode(mode);
            engine.settings.input_mode = mode;
            engine.with_listeners(|registry, id| {
                registry.release(id, ListenerKind::ModeInput(current));
                registry.acquire(id, ListenerKind::ModeInput(mode));
            });
            info!("Switched input mode from {current} to {mode}");
            Ok(())
        });
    }

    fn step_zoom(&mut self, step: f64) {
        self.dispatch("zoom step", |engine| {
            let (anchor_x, anchor_y) = engine.viewport.pan();
            let target = engine.viewport.zoom() + step;
            engine.viewport.zoom_to_around(target, anchor_x, anchor_y)?;
            Ok(())
        });
    }
}
