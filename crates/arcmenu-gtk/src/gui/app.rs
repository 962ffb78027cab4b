use crate::config;
use crate::events::AppEvent;
use crate::gui::canvas::{CairoCanvas, IconImage};
use crate::gui::document::{GtkDocument, GtkFrames};
use crate::gui::{icons, theme};
use arcmenu::{MenuConfig, MenuController, Point};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::PathBuf;

pub type Menu = MenuController<CairoCanvas, GtkDocument, GtkFrames, String>;

pub struct AppInit {
    pub config: MenuConfig,
    pub config_path: Option<PathBuf>,
    pub open: bool,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    menu: Menu,
    status: gtk::Label,
    config_path: Option<PathBuf>,
    // bumped on every reload so decodes started for an older icon list are dropped
    icon_generation: u64,
}

#[derive(Debug)]
pub enum AppMsg {
    Toggle,
    Close,
    Frame,
    PointerMove(Point),
    PointerClick(Point),
    DocumentClick(gtk::Widget),
    IconLoaded(u64, usize, IconImage),
    IconFailed(u64, usize, String),
    Selected(String, usize),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn load_icons(&self, sender: &ComponentSender<Self>) {
        icons::load_all(
            self.icon_generation,
            self.menu.icons().map(|icon| &icon.source),
            sender.input_sender(),
        );
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("arcmenu"),
            set_default_size: (480, 360),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[local_ref]
            stage -> gtk::Overlay {
                add_css_class: "arcmenu-stage",
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        theme::load_css();

        let stage = gtk::Overlay::new();

        let status = gtk::Label::new(Some("Click the button to open the menu"));
        status.set_valign(gtk::Align::End);
        status.set_margin_bottom(24);
        stage.set_child(Some(&status));

        let area = gtk::DrawingArea::new();
        area.add_css_class("arcmenu-canvas");
        area.set_can_target(false);
        stage.add_overlay(&area);

        let target = gtk::Button::with_label("Menu");
        target.add_css_class("arcmenu-target");
        target.set_halign(gtk::Align::Center);
        target.set_valign(gtk::Align::Center);
        {
            let sender = sender.clone();
            target.connect_clicked(move |_| sender.input(AppMsg::Toggle));
        }
        stage.add_overlay(&target);

        let input = sender.input_sender().clone();
        let mut menu = Menu::new(
            init.config,
            CairoCanvas::new(area),
            GtkDocument::new(stage.clone(), input.clone()),
            GtkFrames::new(&stage, input.clone()),
        );
        menu.with_target_element(target.clone().upcast())
            .with_metadata(target.label().map(|l| l.to_string()).unwrap_or_default())
            .with_click_listener(move |label: &String, index| {
                input.emit(AppMsg::Selected(label.clone(), index));
            });

        let model = AppModel {
            menu,
            status,
            config_path: init.config_path,
            icon_generation: 0,
        };
        model.load_icons(&sender);

        let stage = &stage;
        let widgets = view_output!();

        let events = init.events;
        let sender_clone = sender.clone();
        relm4::spawn_local(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        if init.open {
            sender.input(AppMsg::Toggle);
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Toggle => {
                self.menu.toggle();
            }
            AppMsg::Close => {
                self.menu.close();
            }
            AppMsg::Frame => self.menu.on_frame(),
            AppMsg::PointerMove(point) => self.menu.pointer_move(point),
            AppMsg::PointerClick(point) => self.menu.pointer_click(point),
            AppMsg::DocumentClick(widget) => self.menu.document_click(widget),
            AppMsg::IconLoaded(generation, index, image) => {
                if generation == self.icon_generation {
                    self.menu.icon_loaded(index, image);
                }
            }
            AppMsg::IconFailed(generation, index, reason) => {
                if generation == self.icon_generation {
                    self.menu.icon_failed(index, reason);
                }
            }
            AppMsg::Selected(label, index) => {
                self.status
                    .set_label(&format!("{}: picked item {}", label, index));
            }
            AppMsg::ConfigReload => match config::load_menu(self.config_path.as_deref()) {
                Ok(new_config) => {
                    self.menu.reconfigure(new_config);
                    self.icon_generation += 1;
                    self.load_icons(&sender);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
