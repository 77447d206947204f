//! Document view: one gesture engine and one overlay renderer over a host page.
//!
//! The host reports raw pointer input in client coordinates and tells the
//! view when it has rendered a page. The view feeds every event to the
//! gesture engine first, then routes clicks and hover to the overlay only
//! while no pan or pinch is in progress.

use crate::config::Config;
use crate::draw;
use crate::input::{
    GestureEngine, GestureObserver, GestureSettings, InputMode, MouseButton, SharedListeners,
    TouchPoint, WheelEvent,
};
use crate::overlay::{
    DisplayMode, DisplayModeConfig, DisplayModeRegistry, OverlayError, OverlayItem,
    OverlayObserver, OverlayRenderer, RenderConfig, RenderConfigPatch,
};
use log::{debug, warn};

pub struct DocumentView {
    engine: GestureEngine,
    overlay: OverlayRenderer,
    /// Page size in screen pixels from the last completed render
    page_size: Option<(f64, f64)>,
    /// Primary-button press waiting for its release to become a click
    pending_click: bool,
}

impl DocumentView {
    /// Builds a view from loaded configuration.
    pub fn new(config: &Config, listeners: SharedListeners) -> Self {
        Self::with_parts(
            config.gesture_settings(),
            config.display_modes(),
            config.render.clone(),
            listeners,
        )
    }

    pub fn with_parts(
        settings: GestureSettings,
        registry: DisplayModeRegistry,
        render: RenderConfig,
        listeners: SharedListeners,
    ) -> Self {
        Self {
            engine: GestureEngine::new(settings, listeners),
            overlay: OverlayRenderer::new(registry, render),
            page_size: None,
            pending_click: false,
        }
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }

    pub fn set_gesture_observer(&mut self, observer: Box<dyn GestureObserver>) {
        self.engine.set_observer(observer);
    }

    pub fn set_overlay_observer(&mut self, observer: Box<dyn OverlayObserver>) {
        self.overlay.set_observer(observer);
    }

    /// Config of the active display mode, for the host's mode title readout.
    pub fn mode_config(&self) -> Result<&DisplayModeConfig, OverlayError> {
        self.overlay.registry().get(self.overlay.mode())
    }

    pub fn page_size(&self) -> Option<(f64, f64)> {
        self.page_size
    }

    /// Host surface finished rendering the page at `render_scale`.
    ///
    /// The canvas adopts the reported size and the overlay re-lays out with
    /// the same render scale the page used.
    pub fn on_page_rendered(
        &mut self,
        width: f64,
        height: f64,
        render_scale: f64,
    ) -> Result<(), OverlayError> {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            warn!("Ignoring invalid page size {width}x{height}");
            return Ok(());
        }
        debug!("Page rendered at {width}x{height}, scale {render_scale}");
        self.page_size = Some((width, height));
        self.engine.needs_redraw = true;
        self.overlay.set_page_scale(render_scale)
    }

    pub fn set_frame_origin(&mut self, x: f64, y: f64) {
        self.engine.set_frame_origin(x, y);
    }

    // ------------------------------------------------------------------
    // Raw input
    // ------------------------------------------------------------------

    pub fn on_wheel(&mut self, event: WheelEvent) {
        self.engine.on_wheel(event);
    }

    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        self.engine.on_mouse_press(button, x, y);
        if button == MouseButton::Left {
            self.pending_click = !self.engine.gesture_active();
        }
    }

    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        self.engine.on_mouse_motion(x, y);
        if self.engine.gesture_active() {
            self.pending_click = false;
            return;
        }
        let (lx, ly) = self.engine.frame_local(x, y);
        let transform = self.engine.transform();
        self.overlay.on_pointer_move(lx, ly, &transform, false);
    }

    /// A primary press and release with no gesture in between counts as an
    /// overlay click at the release point.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: f64, y: f64) {
        let gesture_active = self.engine.gesture_active();
        self.engine.on_mouse_release(button, x, y);
        if button != MouseButton::Left || !std::mem::take(&mut self.pending_click) {
            return;
        }
        let (lx, ly) = self.engine.frame_local(x, y);
        let transform = self.engine.transform();
        if self.overlay.on_click(lx, ly, &transform, gesture_active) {
            self.engine.needs_redraw = true;
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.pending_click = false;
        self.engine.on_pointer_leave();
    }

    /// Returns true when the host should suppress its context menu.
    pub fn on_context_menu(&self) -> bool {
        self.engine.on_context_menu()
    }

    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) {
        self.engine.on_touch_start(touches);
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) {
        self.engine.on_touch_move(touches);
    }

    pub fn on_touch_end(&mut self, remaining: usize) {
        self.engine.on_touch_end(remaining);
    }

    pub fn on_touch_cancel(&mut self) {
        self.engine.on_touch_cancel();
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.engine.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.engine.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.engine.reset_zoom();
    }

    pub fn restore_view(&mut self, zoom: f64, pan_x: f64, pan_y: f64) {
        self.engine.restore_view(zoom, pan_x, pan_y);
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.pending_click = false;
        self.engine.set_input_mode(mode);
    }

    pub fn set_mode(&mut self, mode: DisplayMode) -> Result<(), OverlayError> {
        self.engine.needs_redraw = true;
        self.overlay.set_mode(mode)
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), OverlayError> {
        self.engine.needs_redraw = true;
        self.overlay.set_page(page)
    }

    /// Replaces the overlay data, e.g. when an annotation fetch completes.
    pub fn set_items(&mut self, items: Vec<OverlayItem>) -> Result<(), OverlayError> {
        self.engine.needs_redraw = true;
        self.overlay.set_items(items)
    }

    pub fn set_render_config(&mut self, patch: &RenderConfigPatch) -> Result<(), OverlayError> {
        self.engine.needs_redraw = true;
        self.overlay.set_render_config(patch)
    }

    /// Paints the overlay layer through the current viewport transform.
    pub fn render(&mut self, ctx: &cairo::Context) {
        draw::render_overlay_transformed(ctx, self.overlay.shapes(), &self.engine.transform());
        self.engine.needs_redraw = false;
    }

    /// Releases every host listener the view's engine holds.
    pub fn unmount(&mut self) {
        self.engine.unmount();
    }
}
