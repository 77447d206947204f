//! Input handling and gesture state machine.
//!
//! This module translates raw pointer, wheel, and multi-touch events into
//! pan/zoom intents on the [`crate::viewport::Viewport`]. It owns the active
//! input mode (mouse or trackpad), the transient gesture state for that mode,
//! and the bookkeeping for host listeners registered on behalf of the engine.

pub mod events;
pub mod listeners;
pub mod mode;
pub mod observer;
pub mod state;

// Re-export commonly used types at module level
pub use events::{MouseButton, TouchPoint, WheelEvent};
pub use listeners::{EngineId, ListenerKind, ListenerRegistry, SharedListeners};
pub use mode::InputMode;
pub use observer::{GestureObserver, NoopGestureObserver};
pub use state::{GestureEngine, GestureError, GestureSettings, GestureState, MouseGesture};
pub use state::{PinchState, TouchGesture};
