use cairo::{Context, ImageSurface};
use pageframe::DocumentView;
use pageframe::draw;
use pageframe::input::{GestureSettings, ListenerRegistry, WheelEvent};
use pageframe::overlay::{
    Coordinates, DisplayMode, DisplayModeRegistry, OverlayItem, RenderConfig,
};

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

/// Premultiplied (b, g, r, a) bytes of one pixel.
fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
}

fn view_with_items(items: Vec<OverlayItem>) -> DocumentView {
    let render = RenderConfig {
        scale: 1.0,
        stroke_width: 2.0,
        ..RenderConfig::default()
    };
    let mut view = DocumentView::with_parts(
        GestureSettings::default(),
        DisplayModeRegistry::builtin(),
        render,
        ListenerRegistry::shared(),
    );
    view.on_page_rendered(200.0, 200.0, 1.0).unwrap();
    view.set_items(items).unwrap();
    view
}

fn square(id: &str, x: f64, y: f64) -> OverlayItem {
    OverlayItem::new(id, id, Coordinates::new(x, y, 40.0, 40.0))
}

#[test]
fn overlay_fill_and_stroke_reach_the_surface() {
    let mut view = view_with_items(vec![square("a", 50.0, 50.0)]);
    let (mut surface, ctx) = surface_with_context(200, 200);
    view.render(&ctx);
    drop(ctx);

    // Inside: translucent blue fill
    let [b, _, r, a] = pixel(&mut surface, 70, 70);
    assert!(a > 0 && a < 255, "fill should be translucent, alpha {a}");
    assert!(b > r);

    // Border: opaque stroke just outside the item edge (padding = stroke width)
    let [_, _, _, a] = pixel(&mut surface, 48, 70);
    assert_eq!(a, 255);

    // Far away: untouched
    assert_eq!(pixel(&mut surface, 5, 5), [0, 0, 0, 0]);
}

#[test]
fn clean_mode_draws_nothing() {
    let mut view = view_with_items(vec![square("a", 50.0, 50.0)]);
    view.set_mode(DisplayMode::Clean).unwrap();
    let (mut surface, ctx) = surface_with_context(200, 200);
    view.render(&ctx);
    drop(ctx);

    let data = surface.data().unwrap();
    assert!(data.iter().all(|byte| *byte == 0));
}

#[test]
fn overlay_follows_viewport_zoom() {
    let mut view = view_with_items(vec![square("a", 0.0, 0.0)]);
    // Zoom 2x around the origin corner
    view.on_wheel(WheelEvent::vertical(0.0, 0.0, -1000.0));
    assert_eq!(view.engine().viewport().zoom(), 2.0);

    let (mut surface, ctx) = surface_with_context(200, 200);
    view.render(&ctx);
    drop(ctx);

    // The 40px square now covers 0..80 on screen
    assert!(pixel(&mut surface, 70, 70)[3] > 0);
    assert_eq!(pixel(&mut surface, 120, 120), [0, 0, 0, 0]);
}

#[test]
fn selected_shape_turns_red() {
    let mut view = view_with_items(vec![square("a", 50.0, 50.0)]);
    view.on_mouse_press(pageframe::input::MouseButton::Left, 70.0, 70.0);
    view.on_mouse_release(pageframe::input::MouseButton::Left, 70.0, 70.0);

    let (mut surface, ctx) = surface_with_context(200, 200);
    view.render(&ctx);
    drop(ctx);

    let [b, g, r, a] = pixel(&mut surface, 70, 70);
    assert!(a > 0);
    assert!(r > g && r > b, "selected fill should be red, got ({r}, {g}, {b})");
}

#[test]
fn page_stand_in_paints_whole_sheet() {
    let (mut surface, ctx) = surface_with_context(100, 100);
    draw::render_page(&ctx, 100.0, 100.0, draw::WHITE);
    drop(ctx);
    assert_eq!(pixel(&mut surface, 50, 50), [255, 255, 255, 255]);
}
