use super::legend::Legend;
use super::theme::ThemeColors;
use super::view;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit_engine::geometry;
use orbit_engine::{ArcPath, Renderer, RingIndex, RingTrack, SurfaceRect, ViewBox};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct SceneRing {
    pub track: RingTrack,
    pub arc: Option<ArcPath>,
    pub stroke_width: f64,
}

/// Everything the drawing area paints, as last set by the engine.
#[derive(Debug, Default)]
pub struct Scene {
    pub view_box: ViewBox,
    pub rings: BTreeMap<RingIndex, SceneRing>,
}

impl Scene {
    pub fn handle_radius(&self) -> f64 {
        let widest = self
            .rings
            .values()
            .map(|ring| ring.track.stroke_width)
            .fold(0.0, f64::max);
        geometry::handle_radius(widest)
    }
}

/// Renderer backed by a GTK drawing area and a legend box.
pub struct GtkSurface {
    area: gtk::DrawingArea,
    scene: Rc<RefCell<Scene>>,
    legend: Legend,
}

impl GtkSurface {
    pub fn new(area: &gtk::DrawingArea, legend: Legend) -> Self {
        let scene = Rc::new(RefCell::new(Scene::default()));

        let scene_draw = scene.clone();
        area.set_draw_func(move |area, cr, width, height| {
            let style_context = area.style_context();
            let colors = ThemeColors::from_context(&style_context);
            let bounds = SurfaceRect::new(0.0, 0.0, width as f64, height as f64);
            if let Err(e) = view::draw(cr, &scene_draw.borrow(), bounds, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });
        area.queue_draw();

        Self {
            area: area.clone(),
            scene,
            legend,
        }
    }
}

impl Renderer for GtkSurface {
    fn surface_bounds(&self) -> SurfaceRect {
        SurfaceRect::new(
            0.0,
            0.0,
            self.area.width() as f64,
            self.area.height() as f64,
        )
    }

    fn set_view_box(&mut self, view_box: &ViewBox) {
        self.scene.borrow_mut().view_box = *view_box;
        self.area.queue_draw();
    }

    fn mount_ring(&mut self, index: RingIndex, track: &RingTrack) {
        self.scene.borrow_mut().rings.insert(
            index,
            SceneRing {
                track: track.clone(),
                arc: None,
                stroke_width: track.stroke_width,
            },
        );
        self.legend.push(index, track);
    }

    fn draw_arc(&mut self, index: RingIndex, path: &ArcPath, stroke_width: f64) {
        if let Some(ring) = self.scene.borrow_mut().rings.get_mut(&index) {
            ring.arc = Some(*path);
            ring.stroke_width = stroke_width;
        }
        self.area.queue_draw();
    }

    fn set_legend_text(&mut self, index: RingIndex, text: &str) {
        self.legend.set_value(index, text);
    }
}
