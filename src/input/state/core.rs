//! Gesture state machine and engine lifetime management.

use crate::config::ViewportConfig;
use crate::input::listeners::{EngineId, ListenerKind, ListenerRegistry, SharedListeners};
use crate::input::mode::InputMode;
use crate::input::observer::{GestureObserver, NoopGestureObserver};
use crate::util;
use crate::viewport::{Transform, Viewport, ViewportError, ZoomBounds};
use log::{debug, warn};
use thiserror::Error;

/// Errors raised while applying one input event.
///
/// These never leave the public handlers: they are logged and the event is dropped.
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("non-finite coordinates in {0} event")]
    NonFinite(&'static str),

    #[error("engine is unmounted")]
    Unmounted,

    #[error(transparent)]
    Viewport(#[from] ViewportError),
}

/// Runtime tuning for the gesture engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSettings {
    /// Zoom range shared by wheel, pinch and button zoom
    pub bounds: ZoomBounds,
    /// Zoom per wheel delta unit in mouse mode
    pub mouse_zoom_rate: f64,
    /// Zoom per wheel delta unit for a trackpad pinch
    pub trackpad_zoom_rate: f64,
    /// Pan distance per wheel delta unit for a two-finger scroll
    pub trackpad_pan_rate: f64,
    /// Midpoint drift that engages two-finger panning
    pub pan_threshold: f64,
    /// Zoom change for the zoom-in/zoom-out commands
    pub zoom_step: f64,
    /// Mode active when the engine mounts
    pub input_mode: InputMode,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            bounds: ZoomBounds::default(),
            mouse_zoom_rate: 0.001,
            trackpad_zoom_rate: 0.003,
            trackpad_pan_rate: 1.5,
            pan_threshold: 5.0,
            zoom_step: 0.1,
            input_mode: InputMode::Mouse,
        }
    }
}

impl From<&ViewportConfig> for GestureSettings {
    fn from(cfg: &ViewportConfig) -> Self {
        let bounds = ZoomBounds::new(cfg.zoom_min, cfg.zoom_max).unwrap_or_else(|err| {
            warn!("{err}; using default zoom bounds");
            ZoomBounds::default()
        });
        Self {
            bounds,
            mouse_zoom_rate: cfg.mouse_zoom_rate,
            trackpad_zoom_rate: cfg.trackpad_zoom_rate,
            trackpad_pan_rate: cfg.trackpad_pan_rate,
            pan_threshold: cfg.pan_threshold,
            zoom_step: cfg.zoom_step,
            input_mode: cfg.input_mode,
        }
    }
}

/// Mouse-mode gesture: idle, or dragging with the secondary button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseGesture {
    Idle,
    Panning { last_x: f64, last_y: f64 },
}

/// Snapshot taken when exactly two contacts land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    /// Distance between the two contacts at gesture start
    pub initial_distance: f64,
    /// Zoom at gesture start
    pub initial_zoom: f64,
    /// Pinch midpoint in frame-local coordinates (the zoom anchor)
    pub center: (f64, f64),
    /// Midpoint seen on the previous move, in client coordinates
    pub last_center: (f64, f64),
    /// Whether midpoint drift has crossed the pan threshold
    pub pan_engaged: bool,
}

/// Trackpad-mode gesture: raw multi-touch tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchGesture {
    pub active_touch_count: usize,
    pub pinch: Option<PinchState>,
}

/// Transient gesture state, one variant per input mode.
///
/// Switching modes replaces the whole value, which drops any gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Mouse(MouseGesture),
    Trackpad(TouchGesture),
}

impl GestureState {
    pub fn for_mode(mode: InputMode) -> Self {
        match mode {
            InputMode::Mouse => Self::Mouse(MouseGesture::Idle),
            InputMode::Trackpad => Self::Trackpad(TouchGesture::default()),
        }
    }

    pub fn mode(&self) -> InputMode {
        match self {
            Self::Mouse(_) => InputMode::Mouse,
            Self::Trackpad(_) => InputMode::Trackpad,
        }
    }
}

/// Values observers are told about, captured before an event is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Snapshot {
    zoom: f64,
    pan: (f64, f64),
    panning: bool,
}

/// Converts raw input into viewport pan/zoom.
///
/// Mounting happens in [`GestureEngine::new`]: the engine acquires the host
/// zoom blocker and the listeners of its initial input mode. Everything it
/// holds is released once, by [`GestureEngine::unmount`] or on drop.
pub struct GestureEngine {
    id: EngineId,
    pub(super) viewport: Viewport,
    pub(super) settings: GestureSettings,
    pub(super) state: GestureState,
    /// Client-space position of the frame's top-left corner
    frame_origin: (f64, f64),
    listeners: SharedListeners,
    observer: Box<dyn GestureObserver>,
    mounted: bool,
    /// Whether the host should repaint the transformed surface
    pub needs_redraw: bool,
}

impl GestureEngine {
    /// Creates and mounts an engine.
    pub fn new(settings: GestureSettings, listeners: SharedListeners) -> Self {
        let id = EngineId::next();
        match listeners.try_borrow_mut() {
            Ok(mut registry) => {
                registry.acquire(id, ListenerKind::HostZoomSuppression);
                registry.acquire(id, ListenerKind::ModeInput(settings.input_mode));
            }
            Err(_) => warn!(
                "Listener registry busy; engine {} mounted without listeners",
                id.value()
            ),
        }

        debug!("Mounted gesture engine {} in {} mode", id.value(), settings.input_mode);

        Self {
            id,
            viewport: Viewport::new(settings.bounds),
            state: GestureState::for_mode(settings.input_mode),
            settings,
            frame_origin: (0.0, 0.0),
            listeners,
            observer: Box::new(NoopGestureObserver),
            mounted: true,
            needs_redraw: true,
        }
    }

    /// Installs the host callback receiver.
    pub fn set_observer(&mut self, observer: Box<dyn GestureObserver>) {
        self.observer = observer;
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn input_mode(&self) -> InputMode {
        self.state.mode()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current CSS-equivalent transform for the surface wrapper.
    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    /// Whether a secondary-button drag pan is in progress.
    pub fn is_panning(&self) -> bool {
        matches!(self.state, GestureState::Mouse(MouseGesture::Panning { .. }))
    }

    /// Whether any pan or pinch gesture is in progress.
    ///
    /// Overlay hit-testing is suppressed while this is true.
    pub fn gesture_active(&self) -> bool {
        match &self.state {
            GestureState::Mouse(gesture) => matches!(gesture, MouseGesture::Panning { .. }),
            GestureState::Trackpad(touch) => touch.pinch.is_some(),
        }
    }

    /// Records where the frame sits in client coordinates.
    pub fn set_frame_origin(&mut self, x: f64, y: f64) {
        if util::all_finite(&[x, y]) {
            self.frame_origin = (x, y);
        } else {
            warn!("Ignoring non-finite frame origin ({x}, {y})");
        }
    }

    /// Whether the host should swallow this wheel event instead of zooming the page itself.
    pub fn should_block_host_wheel(&self, precise_pinch: bool) -> bool {
        self.mounted && (precise_pinch || self.input_mode() == InputMode::Trackpad)
    }

    /// Whether the host should swallow a touch event with this many contacts.
    pub fn should_block_host_touch(&self, touch_count: usize) -> bool {
        self.mounted && touch_count > 1
    }

    /// Releases every listener this engine holds and stops handling input.
    ///
    /// Calling it again is a no-op.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let dragging = self.is_panning();
        let mode = self.input_mode();
        self.state = GestureState::for_mode(mode);
        self.with_listeners(|registry, id| {
            if dragging {
                registry.release(id, ListenerKind::DragPan);
            }
            registry.release(id, ListenerKind::ModeInput(mode));
            registry.release(id, ListenerKind::HostZoomSuppression);
        });
        self.mounted = false;
        debug!("Unmounted gesture engine {}", self.id.value());
    }

    /// Frame-local coordinates for a client-space point.
    pub fn frame_local(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.frame_origin.0, y - self.frame_origin.1)
    }

    pub(super) fn with_listeners(&self, action: impl FnOnce(&mut ListenerRegistry, EngineId)) {
        match self.listeners.try_borrow_mut() {
            Ok(mut registry) => action(&mut registry, self.id),
            Err(_) => warn!(
                "Listener registry busy; engine {} skipped a registration change",
                self.id.value()
            ),
        }
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            zoom: self.viewport.zoom(),
            pan: self.viewport.pan(),
            panning: self.is_panning(),
        }
    }

    /// Runs one event handler: applies it, logs any failure, then notifies observers.
    pub(super) fn dispatch<F>(&mut self, event: &'static str, action: F)
    where
        F: FnOnce(&mut Self) -> Result<(), GestureError>,
    {
        if !self.mounted {
            debug!("Dropping {event} event: {}", GestureError::Unmounted);
            return;
        }
        let before = self.snapshot();
        if let Err(err) = action(self) {
            warn!("Dropping {event} event: {err}");
        }
        self.notify(before);
    }

    pub(super) fn notify(&mut self, before: Snapshot) {
        let after = self.snapshot();
        if after.zoom != before.zoom {
            self.observer.on_zoom_change(after.zoom);
        }
        if after.pan != before.pan {
            self.observer.on_pan_change(after.pan.0, after.pan.1);
        }
        if after.panning != before.panning {
            self.observer.on_panning_change(after.panning);
        }
        if after != before {
            self.needs_redraw = true;
        }
    }
}

impl Drop for GestureEngine {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Rejects events carrying NaN or infinite coordinates.
pub(super) fn ensure_finite(event: &'static str, values: &[f64]) -> Result<(), GestureError> {
    if util::all_finite(values) {
        Ok(())
    } else {
        Err(GestureError::NonFinite(event))
    }
}
