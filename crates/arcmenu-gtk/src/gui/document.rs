use crate::gui::app::AppMsg;
use arcmenu::{Cursor, Document, FrameScheduler, Listener, Point, Rect};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::Sender;

/// Pins `widget` to `rect` inside its `gtk::Overlay` parent.
pub fn place(widget: &impl IsA<gtk::Widget>, rect: Rect) {
    widget.set_halign(gtk::Align::Start);
    widget.set_valign(gtk::Align::Start);
    // margins cannot be negative; near the top left edge the menu is pushed inward
    widget.set_margin_start(rect.x.max(0.0).round() as i32);
    widget.set_margin_top(rect.y.max(0.0).round() as i32);
    widget.set_size_request(rect.width.ceil() as i32, rect.height.ceil() as i32);
}

pub struct Subscription {
    host: gtk::Widget,
    controller: gtk::EventController,
}

/// The widget tree under `stage`, with menu input forwarded as [`AppMsg`]s.
pub struct GtkDocument {
    stage: gtk::Overlay,
    overlay: gtk::Box,
    sender: Sender<AppMsg>,
}

impl GtkDocument {
    pub fn new(stage: gtk::Overlay, sender: Sender<AppMsg>) -> Self {
        let overlay = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        overlay.add_css_class("arcmenu-overlay");
        Self {
            stage,
            overlay,
            sender,
        }
    }

    fn pointer_move(&self) -> gtk::EventController {
        let motion = gtk::EventControllerMotion::new();
        let sender = self.sender.clone();
        motion.connect_motion(move |_, x, y| {
            sender.emit(AppMsg::PointerMove(Point::new(x, y)));
        });
        motion.upcast()
    }

    fn pointer_click(&self) -> gtk::EventController {
        let click = gtk::GestureClick::new();
        let sender = self.sender.clone();
        click.connect_released(move |_, _, x, y| {
            sender.emit(AppMsg::PointerClick(Point::new(x, y)));
        });
        click.upcast()
    }

    fn document_click(&self) -> gtk::EventController {
        let click = gtk::GestureClick::new();
        click.set_propagation_phase(gtk::PropagationPhase::Capture);
        let sender = self.sender.clone();
        let stage = self.stage.downgrade();
        click.connect_pressed(move |_, _, x, y| {
            if let Some(stage) = stage.upgrade()
                && let Some(hit) = stage.pick(x, y, gtk::PickFlags::DEFAULT)
            {
                sender.emit(AppMsg::DocumentClick(hit));
            }
        });
        click.upcast()
    }
}

impl Document for GtkDocument {
    type Node = gtk::Widget;
    type Subscription = Subscription;

    fn create_overlay(&mut self) -> gtk::Widget {
        self.overlay.clone().upcast()
    }

    fn insert_overlay_before(&mut self, overlay: &gtk::Widget, target: &gtk::Widget) {
        let Some(parent) = target.parent() else {
            log::warn!("Menu target is not attached to a parent widget");
            return;
        };
        if overlay.parent().is_some_and(|current| current != parent) {
            overlay.unparent();
        }
        overlay.insert_before(&parent, Some(target));
    }

    fn parent(&self, node: &gtk::Widget) -> Option<gtk::Widget> {
        node.parent()
    }

    fn bounds(&self, node: &gtk::Widget) -> Option<Rect> {
        node.compute_bounds(&self.stage).map(|b| {
            Rect::new(
                b.x() as f64,
                b.y() as f64,
                b.width() as f64,
                b.height() as f64,
            )
        })
    }

    fn place_overlay(&mut self, overlay: &gtk::Widget, rect: Rect) {
        place(overlay, rect);
    }

    fn set_overlay_visible(&mut self, overlay: &gtk::Widget, visible: bool) {
        overlay.set_visible(visible);
    }

    fn set_cursor(&mut self, overlay: &gtk::Widget, cursor: Cursor) {
        let name = match cursor {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        };
        overlay.set_cursor_from_name(Some(name));
    }

    fn subscribe(&mut self, listener: Listener) -> Subscription {
        let (host, controller): (gtk::Widget, gtk::EventController) = match listener {
            Listener::PointerMove => (self.overlay.clone().upcast(), self.pointer_move()),
            Listener::PointerClick => (self.overlay.clone().upcast(), self.pointer_click()),
            Listener::DocumentClick => (self.stage.clone().upcast(), self.document_click()),
        };
        host.add_controller(controller.clone());
        Subscription { host, controller }
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        subscription
            .host
            .remove_controller(&subscription.controller);
    }
}

/// Answers each frame request from the stage's frame clock.
pub struct GtkFrames {
    widget: gtk::Widget,
    sender: Sender<AppMsg>,
}

impl GtkFrames {
    pub fn new(widget: &impl IsA<gtk::Widget>, sender: Sender<AppMsg>) -> Self {
        Self {
            widget: widget.clone().upcast(),
            sender,
        }
    }
}

impl FrameScheduler for GtkFrames {
    fn request_frame(&mut self) {
        let sender = self.sender.clone();
        self.widget.add_tick_callback(move |_, _| {
            sender.emit(AppMsg::Frame);
            glib::ControlFlow::Break
        });
    }
}
