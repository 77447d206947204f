//! Annotation overlay: item model, display modes and the render/hit-test pass.
//!
//! Items arrive in the annotation source's reference resolution. A render
//! pass filters them to the current page, optionally colours them by group,
//! and lays them out as [`OverlayShape`]s in document-pixel space. The
//! viewport transform is applied on top by whoever draws the layer.

pub mod geometry;
pub mod interaction;
pub mod item;
pub mod mode;
pub mod model;
pub mod renderer;
pub mod style;

pub use geometry::{ScreenRect, adjusted_coordinates};
pub use interaction::InteractionState;
pub use item::{
    AnnotationId, Coordinates, ItemType, LegacyAnnotation, OverlayItem, convert_legacy_annotations,
    load_annotations, parse_annotations,
};
pub use mode::{DisplayMode, DisplayModeConfig, DisplayModeRegistry};
pub use model::{assign_group_colors, filter_by_page, generate_group_colors, group_items};
pub use renderer::{NoopOverlayObserver, OverlayObserver, OverlayRenderer, OverlayShape};
pub use style::{ItemState, RenderColors, RenderConfig, RenderConfigPatch, render_colors};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("no display mode registered for \"{0}\"")]
    UnknownDisplayMode(DisplayMode),

    #[error("failed to parse annotations: {0}")]
    AnnotationParse(#[from] serde_json::Error),

    #[error("failed to read annotations from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
