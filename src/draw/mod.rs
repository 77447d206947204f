//! Colours and Cairo rendering for the overlay layer.
//!
//! - [`Color`]: RGBA colour with CSS parsing and formatting
//! - Rendering functions that paint overlay shapes, optionally through the
//!   viewport transform

pub mod color;
pub mod render;

pub use color::Color;
pub use render::{
    apply_transform, fill_background, render_overlay, render_overlay_transformed, render_page,
    render_shape,
};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
