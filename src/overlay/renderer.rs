//! Overlay render pass and pointer hit-testing.

use super::OverlayError;
use super::geometry::{ScreenRect, adjusted_coordinates};
use super::interaction::InteractionState;
use super::item::OverlayItem;
use super::mode::{DisplayMode, DisplayModeConfig, DisplayModeRegistry};
use super::model;
use super::style::{RenderColors, RenderConfig, RenderConfigPatch, render_colors};
use crate::draw::Color;
use crate::viewport::Transform;
use log::{debug, warn};

/// Host callbacks for overlay interaction, fired synchronously from the
/// handler that detected the transition.
pub trait OverlayObserver {
    fn on_item_click(&mut self, _item: &OverlayItem) {}
    /// `None` when the pointer moved off every shape
    fn on_item_hover(&mut self, _item: Option<&OverlayItem>) {}
    fn on_group_click(&mut self, _group_id: &str, _items: &[OverlayItem]) {}
    fn on_group_hover(&mut self, _group_id: &str, _items: &[OverlayItem]) {}
}

pub struct NoopOverlayObserver;

impl OverlayObserver for NoopOverlayObserver {}

/// One drawn rectangle with its resolved style.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayShape {
    /// Item as drawn, including any group colour
    pub item: OverlayItem,
    /// Layer-space bounds, padding included
    pub rect: ScreenRect,
    pub colors: RenderColors,
    pub fill: Color,
    pub stroke: Option<Color>,
    /// Shapes only react to clicks when the mode enables selection; they never move
    pub selectable: bool,
}

impl OverlayShape {
    fn new(
        item: OverlayItem,
        rect: ScreenRect,
        colors: RenderColors,
        config: &RenderConfig,
        selectable: bool,
    ) -> Self {
        Self {
            item,
            rect,
            fill: colors.fill_color(),
            stroke: colors.stroke_color(config),
            colors,
            selectable,
        }
    }

    fn restyle(&mut self, colors: RenderColors, config: &RenderConfig) {
        self.fill = colors.fill_color();
        self.stroke = colors.stroke_color(config);
        self.colors = colors;
    }
}

/// Turns the current item list into styled shapes and routes pointer input
/// to selection and hover.
pub struct OverlayRenderer {
    registry: DisplayModeRegistry,
    config: RenderConfig,
    mode: DisplayMode,
    page: u32,
    /// Host page-render scale, independent of viewport zoom
    page_scale: f64,
    items: Vec<OverlayItem>,
    interaction: InteractionState,
    shapes: Vec<OverlayShape>,
    observer: Box<dyn OverlayObserver>,
}

impl OverlayRenderer {
    pub fn new(registry: DisplayModeRegistry, config: RenderConfig) -> Self {
        Self {
            registry,
            config,
            mode: DisplayMode::default(),
            page: 1,
            page_scale: 1.0,
            items: Vec::new(),
            interaction: InteractionState::default(),
            shapes: Vec::new(),
            observer: Box::new(NoopOverlayObserver),
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn OverlayObserver>) {
        self.observer = observer;
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_scale(&self) -> f64 {
        self.page_scale
    }

    pub fn items(&self) -> &[OverlayItem] {
        &self.items
    }

    pub fn registry(&self) -> &DisplayModeRegistry {
        &self.registry
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Shapes produced by the last render pass, in draw order.
    pub fn shapes(&self) -> &[OverlayShape] {
        &self.shapes
    }

    pub fn set_items(&mut self, items: Vec<OverlayItem>) -> Result<(), OverlayError> {
        debug!("Overlay received {} item(s)", items.len());
        self.items = items;
        self.rebuild()
    }

    /// Switches display mode. An unregistered mode clears the layer and errors.
    pub fn set_mode(&mut self, mode: DisplayMode) -> Result<(), OverlayError> {
        self.mode = mode;
        self.rebuild()
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), OverlayError> {
        self.page = page;
        self.rebuild()
    }

    /// Adopts the scale the host just rendered the page at.
    pub fn set_page_scale(&mut self, scale: f64) -> Result<(), OverlayError> {
        if !(scale.is_finite() && scale > 0.0) {
            warn!("Ignoring invalid page render scale {scale}");
            return Ok(());
        }
        self.page_scale = scale;
        self.rebuild()
    }

    pub fn set_render_config(&mut self, patch: &RenderConfigPatch) -> Result<(), OverlayError> {
        self.config = RenderConfig::default().merged(patch);
        self.rebuild()
    }

    /// Runs a full render pass: filter by page, colour groups, lay out and style.
    ///
    /// # Errors
    /// [`OverlayError::UnknownDisplayMode`] if the active mode is not
    /// registered. The previous shapes are cleared either way.
    pub fn rebuild(&mut self) -> Result<(), OverlayError> {
        self.shapes.clear();
        let mode_config = self.registry.get(self.mode)?.clone();
        if self.mode == DisplayMode::Clean {
            return Ok(());
        }

        let mut visible = model::filter_by_page(&self.items, self.page);
        if mode_config.show_grouping {
            visible = model::assign_group_colors(&visible);
        }

        let padding = self.config.stroke_width;
        let config = &self.config;
        let interaction = &self.interaction;
        let page_scale = self.page_scale;
        self.shapes = visible
            .into_iter()
            .map(|item| {
                let rect =
                    adjusted_coordinates(&item.coordinates, config.scale, page_scale, padding);
                let state = interaction.item_state(&item);
                let colors = render_colors(&item, &mode_config, config, state);
                OverlayShape::new(item, rect, colors, config, mode_config.enable_selection)
            })
            .collect();
        debug!(
            "Rendered {} overlay shape(s) for page {} in {} mode",
            self.shapes.len(),
            self.page,
            self.mode
        );
        Ok(())
    }

    /// Recomputes shape styles from the interaction state without re-laying out.
    fn restyle(&mut self, mode_config: &DisplayModeConfig) {
        for shape in &mut self.shapes {
            let state = self.interaction.item_state(&shape.item);
            let colors = render_colors(&shape.item, mode_config, &self.config, state);
            shape.restyle(colors, &self.config);
        }
    }

    /// Top-most shape under a screen point, mapped through the viewport.
    pub fn hit_test(&self, x: f64, y: f64, transform: &Transform) -> Option<&OverlayShape> {
        let (lx, ly) = transform.invert(x, y);
        self.shapes.iter().rev().find(|shape| shape.rect.contains(lx, ly))
    }

    /// Handles a click at a screen point.
    ///
    /// Ignored while a pan or pinch is active, in clean mode, and in modes
    /// without selection. Returns whether interaction state was evaluated.
    pub fn on_click(
        &mut self,
        x: f64,
        y: f64,
        transform: &Transform,
        gesture_active: bool,
    ) -> bool {
        if gesture_active {
            debug!("Ignoring overlay click during an active gesture");
            return false;
        }
        let Some(mode_config) = self.interactive_config() else {
            return false;
        };
        if !mode_config.enable_selection {
            return false;
        }

        let hit = self.hit_test(x, y, transform).map(|shape| shape.item.clone());
        match hit {
            Some(item) => match item.group() {
                Some(group_id) if mode_config.show_grouping => {
                    if self.interaction.toggle_group(group_id) {
                        let members = model::group_items(&self.items, group_id);
                        self.observer.on_group_click(group_id, &members);
                    }
                }
                _ => {
                    if self.interaction.toggle_item(&item.id) {
                        self.observer.on_item_click(&item);
                    }
                }
            },
            None => self.interaction.clear_selection(),
        }
        self.restyle(&mode_config);
        true
    }

    /// Handles pointer motion at a screen point for hover tracking.
    ///
    /// Each entry into a shape notifies once; leaving every shape notifies
    /// with `None`.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, transform: &Transform, gesture_active: bool) {
        if gesture_active {
            return;
        }
        let Some(mode_config) = self.interactive_config() else {
            return;
        };
        if !mode_config.enable_hover {
            return;
        }

        let hit = self.hit_test(x, y, transform).map(|shape| shape.item.clone());
        let changed = match hit {
            Some(item) => {
                let entered = self.interaction.set_hovered(Some(&item.id));
                if entered {
                    self.observer.on_item_hover(Some(&item));
                    let group = item.group().filter(|_| mode_config.show_grouping);
                    if let Some(group_id) = group {
                        let members = model::group_items(&self.items, group_id);
                        self.observer.on_group_hover(group_id, &members);
                    }
                }
                entered
            }
            None => {
                let left = self.interaction.set_hovered(None);
                if left {
                    self.observer.on_item_hover(None);
                }
                left
            }
        };
        if changed {
            self.restyle(&mode_config);
        }
    }

    /// Config of the active mode when it accepts pointer interaction.
    fn interactive_config(&self) -> Option<DisplayModeConfig> {
        if self.mode == DisplayMode::Clean {
            return None;
        }
        self.registry
            .find(self.mode)
            .filter(|config| config.is_interactive())
            .cloned()
    }
}
