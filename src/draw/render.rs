//! Cairo-based rendering of the overlay layer.

use super::color::Color;
use crate::overlay::OverlayShape;
use crate::viewport::Transform;

/// Applies the viewport transform: translation first, then uniform scale
/// about the frame's top-left corner.
///
/// Callers should wrap this in `save()`/`restore()`.
pub fn apply_transform(ctx: &cairo::Context, transform: &Transform) {
    ctx.translate(transform.translate_x, transform.translate_y);
    ctx.scale(transform.scale, transform.scale);
}

/// Fills the whole target with one colour, replacing what was there.
pub fn fill_background(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_operator(cairo::Operator::Source);
    let _ = ctx.paint();
    let _ = ctx.restore();
}

/// Paints a stand-in for the host's rendered page: a filled sheet with a hairline border.
pub fn render_page(ctx: &cairo::Context, width: f64, height: f64, paper: Color) {
    ctx.set_source_rgba(paper.r, paper.g, paper.b, paper.a);
    ctx.rectangle(0.0, 0.0, width, height);
    let _ = ctx.fill_preserve();

    ctx.set_source_rgba(0.6, 0.6, 0.6, 1.0);
    ctx.set_line_width(1.0);
    let _ = ctx.stroke();
}

/// Renders overlay shapes in order (first shape = bottom layer).
pub fn render_overlay(ctx: &cairo::Context, shapes: &[OverlayShape]) {
    for shape in shapes {
        render_shape(ctx, shape);
    }
}

/// Renders one shape: translucent fill, then its border.
pub fn render_shape(ctx: &cairo::Context, shape: &OverlayShape) {
    let rect = shape.rect;
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }

    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    let fill = shape.fill;
    ctx.set_source_rgba(fill.r, fill.g, fill.b, fill.a);
    let _ = ctx.fill_preserve();

    match shape.stroke {
        Some(stroke) if shape.colors.stroke_width > 0.0 => {
            ctx.set_source_rgba(stroke.r, stroke.g, stroke.b, stroke.a);
            ctx.set_line_width(shape.colors.stroke_width);
            ctx.set_line_join(cairo::LineJoin::Miter);
            let _ = ctx.stroke();
        }
        _ => ctx.new_path(),
    }
}

/// Renders the overlay layer through the viewport transform.
pub fn render_overlay_transformed(
    ctx: &cairo::Context,
    shapes: &[OverlayShape],
    transform: &Transform,
) {
    let _ = ctx.save();
    apply_transform(ctx, transform);
    render_overlay(ctx, shapes);
    let _ = ctx.restore();
}
