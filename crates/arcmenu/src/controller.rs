use crate::config::{Color, ConfigError, IconSpec, MenuConfig};
use crate::document::{Cursor, Document, Listener};
use crate::geometry::{Point, Polar};
use crate::menu::layout::IconSlot;
use crate::menu::view::{self, surface_frame};
use crate::menu::{Animation, AnimationState, IconVisual, Transition, hit};
use crate::surface::{Canvas, FrameScheduler};
use std::fmt::Display;
use strum::IntoEnumIterator;

pub type ClickListener<M> = Box<dyn FnMut(&M, usize)>;

/// Owns a menu's configuration, icons and animation, and wires them to the host's
/// canvas, frame clock and document.
///
/// The host forwards events to the `on_*`/`pointer_*`/`document_click` methods; the
/// controller only expects them while its listeners are subscribed.
pub struct MenuController<C, D, F, M = ()>
where
    C: Canvas,
    D: Document,
    F: FrameScheduler,
{
    config: MenuConfig,
    slots: Vec<IconSlot<C::Image>>,
    animation: Animation,
    canvas: C,
    document: D,
    frames: F,
    overlay: D::Node,
    target: Option<D::Node>,
    subscriptions: Vec<D::Subscription>,
    click_listener: Option<ClickListener<M>>,
    metadata: M,
}

impl<C, D, F, M> MenuController<C, D, F, M>
where
    C: Canvas,
    D: Document,
    F: FrameScheduler,
    M: Default,
{
    pub fn new(config: MenuConfig, canvas: C, mut document: D, frames: F) -> Self {
        let overlay = document.create_overlay();
        document.set_overlay_visible(&overlay, false);
        Self {
            slots: IconSlot::from_config(&config),
            config,
            animation: Animation::default(),
            canvas,
            document,
            frames,
            overlay,
            target: None,
            subscriptions: Vec::new(),
            click_listener: None,
            metadata: M::default(),
        }
    }
}

impl<C, D, F, M> MenuController<C, D, F, M>
where
    C: Canvas,
    D: Document,
    F: FrameScheduler,
{
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn icons(&self) -> impl Iterator<Item = &IconSpec> {
        self.slots.iter().map(|slot| &slot.spec)
    }

    pub fn icon_visual(&self, index: usize) -> Option<&IconVisual> {
        self.slots.get(index).and_then(IconSlot::visual)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.visual().is_some_and(|v| v.selected))
    }

    pub fn state(&self) -> AnimationState {
        self.animation.state()
    }

    pub fn current_radius(&self) -> f64 {
        self.animation.current_radius()
    }

    pub fn is_listening(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Anchors the menu on `target` and slots the overlay in just before it.
    pub fn with_target_element(&mut self, target: D::Node) -> &mut Self {
        self.document.insert_overlay_before(&self.overlay, &target);
        self.target = Some(target);
        self
    }

    pub fn with_start_angle(&mut self, degrees: f64) -> Result<&mut Self, ConfigError> {
        self.config.set_start_angle(degrees)?;
        self.relayout();
        self.refresh();
        Ok(self)
    }

    pub fn with_end_angle(&mut self, degrees: f64) -> Result<&mut Self, ConfigError> {
        self.config.set_end_angle(degrees)?;
        self.relayout();
        self.refresh();
        Ok(self)
    }

    pub fn with_arc(&mut self, start: f64, end: f64) -> Result<&mut Self, ConfigError> {
        self.config.set_arc(start, end)?;
        self.relayout();
        self.refresh();
        Ok(self)
    }

    pub fn with_inner_radius(&mut self, radius: f64) -> Result<&mut Self, ConfigError> {
        self.config.set_inner_radius(radius)?;
        self.relayout();
        self.refresh();
        Ok(self)
    }

    pub fn with_outer_radius(&mut self, radius: f64) -> Result<&mut Self, ConfigError> {
        self.config.set_outer_radius(radius)?;
        self.relayout();
        self.refresh();
        Ok(self)
    }

    pub fn with_radii(&mut self, inner: f64, outer: f64) -> Result<&mut Self, ConfigError> {
        self.config.set_radii(inner, outer)?;
        self.relayout();
        self.refresh();
        Ok(self)
    }

    pub fn with_stroke_width(&mut self, width: f64) -> Result<&mut Self, ConfigError> {
        self.config.set_stroke_width(width)?;
        self.refresh();
        Ok(self)
    }

    pub fn with_fill_color(&mut self, color: Color) -> &mut Self {
        self.config.set_fill_color(color);
        self
    }

    pub fn with_fill_color_selected(&mut self, color: Color) -> &mut Self {
        self.config.set_fill_color_selected(color);
        self
    }

    pub fn with_stroke_color(&mut self, color: Color) -> &mut Self {
        self.config.set_stroke_color(color);
        self
    }

    pub fn with_click_listener(&mut self, listener: impl FnMut(&M, usize) + 'static) -> &mut Self {
        self.click_listener = Some(Box::new(listener));
        self
    }

    pub fn with_metadata(&mut self, metadata: M) -> &mut Self {
        self.metadata = metadata;
        self
    }

    /// Replaces the whole configuration. The menu closes and every decoded image is
    /// dropped, so the host has to load the new icon list.
    pub fn reconfigure(&mut self, config: MenuConfig) {
        self.close();
        self.slots = IconSlot::from_config(&config);
        self.config = config;
    }

    /// Stores a decoded icon image. Loads may arrive in any order.
    pub fn icon_loaded(&mut self, index: usize, image: C::Image) {
        let count = self.slots.len();
        let Some(slot) = self.slots.get_mut(index) else {
            log::warn!("Icon {} loaded, but the menu only has {} icons", index, count);
            return;
        };

        slot.load(image, index, count, &self.config);
        if !slot.is_loaded() {
            log::warn!("Icon {} ({}) has an empty bitmap", index, slot.spec.source);
        }

        if self.animation.state() == AnimationState::Open {
            self.paint(self.animation.current_radius());
        }
    }

    /// The icon stays empty; the rest of the menu keeps working.
    pub fn icon_failed(&mut self, index: usize, reason: impl Display) {
        match self.slots.get(index) {
            Some(slot) => log::warn!(
                "Failed to load icon {} ({}): {}",
                index,
                slot.spec.source,
                reason
            ),
            None => log::warn!("Failed to load unknown icon {}: {}", index, reason),
        }
    }

    pub fn toggle(&mut self) -> &mut Self {
        if self.animation.state() == AnimationState::Open {
            self.close()
        } else {
            self.open()
        }
    }

    pub fn open(&mut self) -> &mut Self {
        if self.target.is_none() {
            log::warn!("Menu opened before a target element was attached");
            return self;
        }

        match self.animation.open(self.config.ring()) {
            Transition::Started => {
                log::debug!("Menu opening");
                self.show_overlay(true);
                self.attach_listeners();
                self.frames.request_frame();
            }
            Transition::Reversed => {
                log::debug!("Menu reversing to open");
                self.show_overlay(true);
                self.attach_listeners();
            }
            Transition::Ignored => {}
        }
        self
    }

    pub fn close(&mut self) -> &mut Self {
        match self.animation.close(self.config.ring()) {
            Transition::Started => {
                log::debug!("Menu closing");
                self.show_overlay(false);
                self.detach_listeners();
                self.clear_selection();
                self.frames.request_frame();
            }
            Transition::Reversed => {
                log::debug!("Menu reversing to close");
                self.show_overlay(false);
                self.detach_listeners();
                self.clear_selection();
            }
            Transition::Ignored => {}
        }
        self
    }

    /// Answers one `request_frame`.
    pub fn on_frame(&mut self) {
        let Some(tick) = self.animation.tick(self.config.ring()) else {
            return;
        };

        if tick.settled.is_none() {
            self.frames.request_frame();
        }
        self.paint(tick.radius);

        if let Some(state) = tick.settled {
            log::debug!("Menu {}", state);
            if state == AnimationState::Closed {
                if let Err(e) = self.canvas.clear() {
                    log::error!("Failed to clear menu surface: {}", e);
                }
                self.canvas.present();
            }
        }
    }

    /// Pointer position in overlay coordinates.
    pub fn pointer_move(&mut self, point: Point) {
        if !self.is_listening() {
            return;
        }

        let pointer = Polar::of(point, self.local_center());
        let change = hit::update_selection(
            self.slots.iter_mut().filter_map(IconSlot::visual_mut),
            pointer,
            self.config.ring(),
        );

        if change.changed {
            let cursor = if change.any_selected {
                Cursor::Pointer
            } else {
                Cursor::Default
            };
            self.document.set_cursor(&self.overlay, cursor);
            self.paint(self.animation.current_radius());
        }
    }

    /// Click in overlay coordinates. Reports the sector under the pointer, then closes.
    pub fn pointer_click(&mut self, point: Point) {
        if !self.is_listening() {
            return;
        }

        let angle = Polar::of(point, self.local_center()).angle;
        let index = hit::resolve_click(
            self.slots
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.visual().map(|v| (i, v))),
            angle,
        );

        if let (Some(index), Some(listener)) = (index, self.click_listener.as_mut()) {
            log::info!("Menu item {} selected", index);
            listener(&self.metadata, index);
        }
        self.close();
    }

    /// Click anywhere in the document. Closes the menu unless `node` lies inside the
    /// overlay or the target element.
    pub fn document_click(&mut self, node: D::Node) {
        if !self.is_listening() {
            return;
        }

        let mut current = Some(node);
        while let Some(node) = current {
            if node == self.overlay || self.target.as_ref() == Some(&node) {
                return;
            }
            current = self.document.parent(&node);
        }
        self.close();
    }

    fn local_center(&self) -> Point {
        let half = self.config.surface_half_extent();
        Point::new(half, half)
    }

    fn relayout(&mut self) {
        let count = self.slots.len();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.relayout(index, count, &self.config);
        }
    }

    /// Repaints a visible menu after its geometry changed, so the pointer is resolved
    /// against what is on screen.
    fn refresh(&mut self) {
        if let Some(radius) = self.animation.fit_to(self.config.ring()) {
            self.paint(radius);
        }
    }

    fn clear_selection(&mut self) {
        hit::clear_selection(self.slots.iter_mut().filter_map(IconSlot::visual_mut));
    }

    fn show_overlay(&mut self, visible: bool) {
        self.document.set_overlay_visible(&self.overlay, visible);
    }

    fn attach_listeners(&mut self) {
        if self.is_listening() {
            return;
        }
        self.subscriptions = Listener::iter()
            .map(|listener| self.document.subscribe(listener))
            .collect();
        log::debug!("Attached {} menu listeners", self.subscriptions.len());
    }

    fn detach_listeners(&mut self) {
        if !self.is_listening() {
            return;
        }
        for subscription in self.subscriptions.drain(..) {
            self.document.unsubscribe(subscription);
        }
        self.document.set_cursor(&self.overlay, Cursor::Default);
        log::debug!("Detached menu listeners");
    }

    fn paint(&mut self, radius: f64) {
        let Some(bounds) = self.target.as_ref().and_then(|t| self.document.bounds(t)) else {
            log::warn!("Menu target has no layout yet, skipping paint");
            return;
        };

        let frame = surface_frame(&self.config, bounds.center());
        self.document.place_overlay(&self.overlay, frame.bounds);

        if let Err(e) = view::paint(&mut self.canvas, &self.config, &self.slots, frame, radius) {
            log::error!("Drawing error: {}", e);
        }
        self.canvas.present();
    }
}
