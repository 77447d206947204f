use crate::input::events::TouchPoint;
use crate::util;
use log::debug;

use super::core::{GestureError, ensure_finite};
use super::{GestureEngine, GestureState, PinchState, TouchGesture};

fn ensure_touches_finite(event: &'static str, touches: &[TouchPoint]) -> Result<(), GestureError> {
    for touch in touches {
        ensure_finite(event, &[touch.x, touch.y])?;
    }
    Ok(())
}

impl GestureEngine {
    /// Processes a touch start with every contact currently down.
    ///
    /// Exactly two contacts snapshot a pinch. One contact is left to the host
    /// (annotation interaction). Touch input is ignored in mouse mode.
    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) {
        self.dispatch("touch start", |engine| engine.begin_touch(touches));
    }

    /// Processes a touch move with every contact currently down.
    ///
    /// With an active two-contact gesture, zooms by the distance ratio around
    /// the pinch start center, and pans by the midpoint delta once drift has
    /// exceeded the pan threshold. Both can apply on the same move.
    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) {
        self.dispatch("touch move", |engine| engine.continue_touch(touches));
    }

    /// Processes a touch end given how many contacts remain down.
    pub fn on_touch_end(&mut self, remaining: usize) {
        self.dispatch("touch end", |engine| {
            engine.end_touch(remaining);
            Ok(())
        });
    }

    /// The platform cancelled the touch sequence: drop all touch state.
    pub fn on_touch_cancel(&mut self) {
        self.dispatch("touch cancel", |engine| {
            engine.end_touch(0);
            Ok(())
        });
    }

    fn begin_touch(&mut self, touches: &[TouchPoint]) -> Result<(), GestureError> {
        ensure_touches_finite("touch start", touches)?;
        let zoom = self.viewport.zoom();
        let local_center = match touches {
            [a, b] => {
                let (mx, my) = util::touch_center(*a, *b);
                Some(self.frame_local(mx, my))
            }
            _ => None,
        };
        let GestureState::Trackpad(touch) = &mut self.state else {
            debug!("Ignoring touch start in mouse mode");
            return Ok(());
        };

        *touch = match (touches, local_center) {
            ([a, b], Some(center)) => {
                let initial_distance = util::touch_distance(*a, *b);
                debug!("Pinch started: distance {initial_distance:.1}, zoom {zoom:.3}");
                TouchGesture {
                    active_touch_count: 2,
                    pinch: Some(PinchState {
                        initial_distance,
                        initial_zoom: zoom,
                        center,
                        last_center: util::touch_center(*a, *b),
                        pan_engaged: false,
                    }),
                }
            }
            _ => TouchGesture {
                active_touch_count: touches.len(),
                pinch: None,
            },
        };
        Ok(())
    }

    fn continue_touch(&mut self, touches: &[TouchPoint]) -> Result<(), GestureError> {
        ensure_touches_finite("touch move", touches)?;
        let [a, b] = touches else {
            return Ok(());
        };
        let GestureState::Trackpad(TouchGesture {
            active_touch_count: 2,
            pinch: Some(pinch),
        }) = &mut self.state
        else {
            return Ok(());
        };

        let current_distance = util::touch_distance(*a, *b);
        let current_center = util::touch_center(*a, *b);
        let zoom_target = if pinch.initial_distance > 0.0 {
            Some(pinch.initial_zoom * (current_distance / pinch.initial_distance))
        } else {
            None
        };
        let anchor = pinch.center;

        let dx = current_center.0 - pinch.last_center.0;
        let dy = current_center.1 - pinch.last_center.1;
        let pan_delta = if pinch.pan_engaged {
            Some((dx, dy))
        } else {
            if (dx * dx + dy * dy).sqrt() > self.settings.pan_threshold {
                pinch.pan_engaged = true;
                debug!("Two-finger pan engaged");
            }
            None
        };
        pinch.last_center = current_center;

        match zoom_target {
            Some(target) => self.viewport.zoom_to_around(target, anchor.0, anchor.1)?,
            None => debug!("Skipping pinch zoom: zero initial distance"),
        }
        if let Some((dx, dy)) = pan_delta {
            self.viewport.translate_by(dx, dy)?;
        }
        Ok(())
    }

    fn end_touch(&mut self, remaining: usize) {
        let GestureState::Trackpad(touch) = &mut self.state else {
            return;
        };
        if touch.pinch.is_some() && remaining < 2 {
            debug!("Pinch ended with {remaining} contact(s) left");
        }
        *touch = TouchGesture {
            active_touch_count: remaining,
            pinch: None,
        };
    }
}
