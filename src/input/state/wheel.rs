use crate::input::events::WheelEvent;

use super::core::{GestureError, ensure_finite};
use super::{GestureEngine, GestureState};

impl GestureEngine {
    /// Processes a wheel event.
    ///
    /// # Behavior
    /// - Mouse mode: always zooms around the cursor
    ///   (`delta = -delta_y * mouse_zoom_rate`)
    /// - Trackpad mode with the precise-pinch flag: zooms around the cursor
    ///   (`delta = -delta_y * trackpad_zoom_rate`)
    /// - Trackpad mode without it: two-axis pan
    ///   (`-delta_x * pan_rate`, `-delta_y * pan_rate`)
    pub fn on_wheel(&mut self, event: WheelEvent) {
        self.dispatch("wheel", |engine| engine.apply_wheel(event));
    }

    fn apply_wheel(&mut self, event: WheelEvent) -> Result<(), GestureError> {
        ensure_finite(
            "wheel",
            &[event.x, event.y, event.delta_x, event.delta_y],
        )?;
        let (cx, cy) = self.frame_local(event.x, event.y);

        match self.state {
            GestureState::Mouse(_) => {
                let delta = -event.delta_y * self.settings.mouse_zoom_rate;
                self.viewport.zoom_around(delta, cx, cy)?;
            }
            GestureState::Trackpad(_) if event.precise_pinch => {
                let delta = -event.delta_y * self.settings.trackpad_zoom_rate;
                self.viewport.zoom_around(delta, cx, cy)?;
            }
            GestureState::Trackpad(_) => {
                let rate = self.settings.trackpad_pan_rate;
                self.viewport
                    .translate_by(-event.delta_x * rate, -event.delta_y * rate)?;
            }
        }
        Ok(())
    }
}
