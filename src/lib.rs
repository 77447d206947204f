//! Pan/zoom viewport and annotation overlay engine for paginated documents.
//!
//! The host owns the page image and the raw input stream. This crate turns
//! that input into a consistent viewport transform (zoom around the cursor or
//! pinch center, drag and two-finger pan) and lays out a second layer of
//! selectable annotation shapes keyed to document coordinates.

pub mod config;
pub mod draw;
pub mod input;
pub mod overlay;
pub mod util;
pub mod view;
pub mod viewport;

pub use config::Config;
pub use view::DocumentView;
