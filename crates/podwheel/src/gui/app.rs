use crate::config::{self, Config, HapticMode};
use crate::events::AppEvent;
use crate::gui::confirm::ArmedConfirm;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, Layout, WINDOW_HEIGHT, WINDOW_WIDTH, Zone};
use crate::gui::window::{self, BellHaptics, ClipboardSharer};
use crate::sys::worker::Services;
use clickwheel::collab::{CollaboratorError, Haptics, IdentityService, NoHaptics, Sharer};
use clickwheel::controller::Outbound;
use clickwheel::{Controller, Point, Rotation};
use gtk::gdk::Key;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub struct AppInit {
    pub config: Config,
    pub services: Arc<Services>,
    pub work_tx: async_channel::Sender<Outbound>,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub controller: Rc<RefCell<Controller>>,
    pub confirm: Rc<RefCell<ArmedConfirm>>,
    pub config: Rc<RefCell<Config>>,
    pub services: Arc<Services>,
    pub work_tx: async_channel::Sender<Outbound>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    PointerMove(Point),
    PointerLeave,
    Press(Point),
    Rotate(Rotation),
    Select,
    Menu,
    PlayPause,
    ConfigReload,
    Collaborator(AppEvent),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Rotate(r) => AppMsg::Rotate(r),
            AppEvent::Select => AppMsg::Select,
            AppEvent::Menu => AppMsg::Menu,
            AppEvent::PlayPause => AppMsg::PlayPause,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            other => AppMsg::Collaborator(other),
        }
    }
}

fn key_message(key: Key) -> Option<AppMsg> {
    match key {
        Key::Up | Key::Left => Some(AppMsg::Rotate(Rotation::CounterClockwise)),
        Key::Down | Key::Right => Some(AppMsg::Rotate(Rotation::Clockwise)),
        Key::Return | Key::KP_Enter | Key::space => Some(AppMsg::Select),
        Key::Escape | Key::BackSpace => Some(AppMsg::Menu),
        Key::p => Some(AppMsg::PlayPause),
        _ => None,
    }
}

fn haptics(mode: HapticMode) -> Box<dyn Haptics> {
    match mode {
        HapticMode::Off => Box::new(NoHaptics),
        HapticMode::Beep => Box::new(BellHaptics::new()),
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("My Five"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "podwheel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key_message(key) {
                        Some(msg) => {
                            sender.input(msg);
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "podwheel-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::PointerLeave);
                    }
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Press(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            services,
            work_tx,
            rx,
        } = init;

        theme::load_css();
        window::init_window(&root);

        let layout = Layout::new(
            WINDOW_WIDTH as f64,
            WINDOW_HEIGHT as f64,
            config.wheel.hub_ratio,
        );
        let mut controller = Controller::new(layout.wheel, config.wheel.dead_zone)
            .with_haptics(haptics(config.wheel.haptics));
        controller.set_identity(services.identity.current_identity());

        let model = AppModel {
            controller: Rc::new(RefCell::new(controller)),
            confirm: Rc::new(RefCell::new(ArmedConfirm::default())),
            config: Rc::new(RefCell::new(config)),
            services,
            work_tx,
            visible: true,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let controller_draw = model.controller.clone();
        let confirm_draw = model.confirm.clone();
        let config_draw = model.config.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let layout = Layout::new(
                    width as f64,
                    height as f64,
                    config_draw.borrow().wheel.hub_ratio,
                );
                let banner = confirm_draw.borrow().banner();
                if let Err(e) = wheel::draw(cr, &controller_draw.borrow(), &layout, &colors, banner)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        model.flush();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.root.present();
            }
            AppMsg::Hide => {
                self.visible = false;
            }
            AppMsg::PointerMove(point) => {
                let layout = self.layout();
                let mut controller = self.controller.borrow_mut();
                controller.set_wheel(layout.wheel);
                if controller.pointer_move(point).is_some() {
                    self.confirm.borrow_mut().disarm();
                }
            }
            AppMsg::PointerLeave => self.controller.borrow_mut().pointer_leave(),
            AppMsg::Press(point) => match self.layout().zone(point) {
                Zone::Hub => self.select(),
                Zone::Menu => self.menu(),
                Zone::Next => self.rotate(Rotation::Clockwise),
                Zone::Previous => self.rotate(Rotation::CounterClockwise),
                Zone::PlayPause => self.controller.borrow_mut().toggle_playback(),
                Zone::Screen => self.controller.borrow_mut().dismiss_notice(),
                Zone::Outside => {}
            },
            AppMsg::Rotate(rotation) => self.rotate(rotation),
            AppMsg::Select => self.select(),
            AppMsg::Menu => self.menu(),
            AppMsg::PlayPause => self.controller.borrow_mut().toggle_playback(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.reconfigure(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Collaborator(event) => self.collaborator(event),
        }
        self.flush();
        self.drawing_area.queue_draw();
    }
}

impl AppModel {
    fn layout(&self) -> Layout {
        Layout::new(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
            self.config.borrow().wheel.hub_ratio,
        )
    }

    fn rotate(&self, rotation: Rotation) {
        self.confirm.borrow_mut().disarm();
        self.controller.borrow_mut().rotate(rotation);
    }

    fn select(&self) {
        let mut confirm = self.confirm.borrow_mut();
        let effect = self.controller.borrow_mut().commit(&mut *confirm);
        log::debug!("Select -> {:?}", effect);
    }

    fn menu(&self) {
        self.confirm.borrow_mut().disarm();
        let effect = self.controller.borrow_mut().menu_press();
        log::debug!("Menu -> {:?}", effect);
    }

    fn reconfigure(&self, new_config: Config) {
        {
            let mut controller = self.controller.borrow_mut();
            controller.set_dead_zone(new_config.wheel.dead_zone);
            controller.set_haptics(haptics(new_config.wheel.haptics));
        }
        self.services.reconfigure(&new_config);
        *self.config.borrow_mut() = new_config;
    }

    fn collaborator(&self, event: AppEvent) {
        let mut controller = self.controller.borrow_mut();
        match event {
            AppEvent::IdentityChanged(identity) => controller.set_identity(identity),
            AppEvent::Loaded(ticket, loaded) => {
                controller.deliver(&ticket, loaded);
            }
            AppEvent::LoadFailed(ticket, e) => {
                controller.load_failed(&ticket, &e);
            }
            AppEvent::TrackResolved(url, meta) => controller.resolve_track(&url, meta),
            AppEvent::JobDone(id, result) => controller.complete(id, result),
            AppEvent::ShareOnClipboard(id, message) => {
                let result = ClipboardSharer::for_window(&self.root).share(&message);
                controller.complete(id, result);
            }
            other => log::debug!("Unhandled event {:?}", other),
        }
    }

    /// Sends queued work to the background worker. Work it can no longer
    /// take fails on the spot.
    fn flush(&self) {
        let outbound = self.controller.borrow_mut().drain_outbox();
        for item in outbound {
            if let Err(e) = self.work_tx.try_send(item) {
                let err = CollaboratorError::Network("background worker stopped".into());
                let mut controller = self.controller.borrow_mut();
                match e.into_inner() {
                    Outbound::Job(job) => controller.complete(job.id, Err(err)),
                    Outbound::Load(ticket) => {
                        controller.load_failed(&ticket, &err);
                    }
                }
            }
        }
    }
}
