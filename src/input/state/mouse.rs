use crate::input::events::MouseButton;
use crate::input::listeners::ListenerKind;
use log::debug;

use super::core::{GestureError, ensure_finite};
use super::{GestureEngine, GestureState, MouseGesture};

impl GestureEngine {
    /// Processes a mouse button press event.
    ///
    /// # Behavior
    /// - Secondary (right) button in mouse mode: starts a drag pan and
    ///   registers the window-scoped move/up listeners
    /// - Any other button, or trackpad mode: ignored (left clicks belong to the overlay)
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        self.dispatch("mouse press", |engine| engine.begin_drag_pan(button, x, y));
    }

    /// Processes pointer motion.
    ///
    /// While a drag pan is active, every move translates the viewport by the
    /// pointer delta since the previous move.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        self.dispatch("mouse motion", |engine| engine.continue_drag_pan(x, y));
    }

    /// Processes a button release. Any release ends a drag pan.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: f64, y: f64) {
        self.dispatch("mouse release", |engine| {
            ensure_finite("mouse release", &[x, y])?;
            if engine.end_drag_pan() {
                debug!("Drag pan ended by {:?} release", button);
            }
            Ok(())
        });
    }

    /// Pointer left the interactive surface: cancels a drag pan.
    ///
    /// Pan already applied is kept.
    pub fn on_pointer_leave(&mut self) {
        self.dispatch("pointer leave", |engine| {
            if engine.end_drag_pan() {
                debug!("Drag pan cancelled: pointer left the surface");
            }
            Ok(())
        });
    }

    /// Returns true when the host should suppress its context menu.
    ///
    /// The secondary button pans in mouse mode, so the menu is always blocked there.
    pub fn on_context_menu(&self) -> bool {
        self.is_mounted() && matches!(self.state, GestureState::Mouse(_))
    }

    fn begin_drag_pan(&mut self, button: MouseButton, x: f64, y: f64) -> Result<(), GestureError> {
        ensure_finite("mouse press", &[x, y])?;
        if button != MouseButton::Right {
            return Ok(());
        }
        let GestureState::Mouse(gesture) = &mut self.state else {
            return Ok(());
        };

        let was_idle = matches!(gesture, MouseGesture::Idle);
        *gesture = MouseGesture::Panning {
            last_x: x,
            last_y: y,
        };
        if was_idle {
            self.with_listeners(|registry, id| {
                registry.acquire(id, ListenerKind::DragPan);
            });
            debug!("Drag pan started at ({x:.1}, {y:.1})");
        }
        Ok(())
    }

    fn continue_drag_pan(&mut self, x: f64, y: f64) -> Result<(), GestureError> {
        ensure_finite("mouse motion", &[x, y])?;
        let GestureState::Mouse(MouseGesture::Panning { last_x, last_y }) = &mut self.state else {
            return Ok(());
        };

        let dx = x - *last_x;
        let dy = y - *last_y;
        *last_x = x;
        *last_y = y;
        self.viewport.translate_by(dx, dy)?;
        Ok(())
    }

    /// Ends a drag pan if one is active; returns whether anything was ended.
    pub(super) fn end_drag_pan(&mut self) -> bool {
        if !matches!(self.state, GestureState::Mouse(MouseGesture::Panning { .. })) {
            return false;
        }
        self.state = GestureState::Mouse(MouseGesture::Idle);
        self.with_listeners(|registry, id| {
            registry.release(id, ListenerKind::DragPan);
        });
        true
    }
}
