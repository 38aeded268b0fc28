use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::legend::Legend;
use crate::gui::surface::GtkSurface;
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit_engine::{Engine, EngineError, InputEvent, Point};
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub engine: Rc<RefCell<Engine<GtkSurface>>>,
    pub config_path: PathBuf,
    pub drawing_area: gtk::DrawingArea,
    pub legend_box: gtk::Box,
}

#[derive(Debug)]
pub enum AppMsg {
    Input(InputEvent),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn build_engine(
    config: &Config,
    drawing_area: &gtk::DrawingArea,
    legend_box: &gtk::Box,
) -> Result<Engine<GtkSurface>, EngineError> {
    let surface = GtkSurface::new(drawing_area, Legend::new(legend_box.clone()));
    config.build_engine(surface)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, PathBuf, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            set_default_size: (420, 560),

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "orbit-drawing-area",

                    connect_resize[sender] => move |_, _, _| {
                        sender.input(AppMsg::Input(InputEvent::Resize));
                    },

                    add_controller = gtk::EventControllerMotion {
                        connect_leave[sender] => move |_| {
                            sender.input(AppMsg::Input(InputEvent::PointerStop));
                        }
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::Input(InputEvent::PointerStart(Point::new(x, y))));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Input(InputEvent::PointerMove(
                                    Point::new(x + dx, y + dy),
                                )));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::Input(InputEvent::PointerStop));
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::Input(InputEvent::PointerStop));
                        }
                    }
                },

                #[name = "legend_box"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 4,
                    add_css_class: "orbit-legend",
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, config_path, rx) = init;

        theme::load_css();

        let widgets = view_output!();

        let engine = match build_engine(&config, &widgets.drawing_area, &widgets.legend_box) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("Falling back to built-in sliders: {}", e);
                build_engine(
                    &config::default_config(),
                    &widgets.drawing_area,
                    &widgets.legend_box,
                )
                .expect("built-in config builds an engine")
            }
        };
        let engine = Rc::new(RefCell::new(engine));

        // drawing is batched to the frame clock
        let engine_tick = engine.clone();
        widgets.drawing_area.add_tick_callback(move |_, _| {
            match engine_tick.try_borrow_mut() {
                Ok(mut engine) => {
                    engine.flush_frame();
                }
                Err(_) => log::trace!("Engine busy, deferring frame"),
            }
            glib::ControlFlow::Continue
        });

        let model = AppModel {
            engine,
            config_path,
            drawing_area: widgets.drawing_area.clone(),
            legend_box: widgets.legend_box.clone(),
        };

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Input(event) => {
                let mut engine = self.engine.borrow_mut();
                engine.dispatch(event);
                log::trace!("{:?} -> {}", event, engine.drag_state());
            }
            AppMsg::ConfigReload => {
                if let Some(new_config) = config::reload_config(&self.config_path) {
                    match build_engine(&new_config, &self.drawing_area, &self.legend_box) {
                        Ok(engine) => {
                            *self.engine.borrow_mut() = engine;
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::error!("Failed to rebuild sliders: {}", e),
                    }
                }
            }
        }
    }
}
