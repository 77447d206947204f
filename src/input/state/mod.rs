mod actions;
mod core;
mod mouse;
mod touch;
mod wheel;

pub use self::core::{
    GestureEngine, GestureError, GestureSettings, GestureState, MouseGesture, PinchState,
    TouchGesture,
};
