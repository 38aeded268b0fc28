//! Drawing capability the engine drives, and the renderers shipped with it.

pub mod svg;

pub use svg::SvgRenderer;

use crate::geometry::{ArcPath, ViewBox};
use crate::ring::{Ring, RingColor, RingId, RingIndex};
use crate::surface::SurfaceRect;

/// Static decoration of a ring, handed over once when the ring is added.
#[derive(Debug, Clone, PartialEq)]
pub struct RingTrack {
    pub id: RingId,
    pub label: String,
    pub color: RingColor,
    pub path: ArcPath,
    /// Dash length along the track, each dash followed by a unit gap.
    pub dash_length: f64,
    pub stroke_width: f64,
}

impl RingTrack {
    pub fn new(ring: &Ring, stroke_width: f64) -> Self {
        Self {
            id: ring.id().clone(),
            label: ring.label().to_string(),
            color: ring.color(),
            path: ArcPath::full_circle(ring.radius()),
            dash_length: ring.track_dash_length(),
            stroke_width,
        }
    }

    pub fn dash_array(&self) -> String {
        format!("{:.5} 1", self.dash_length)
    }
}

/// Host side of the engine: reports surface geometry and draws what the
/// engine tells it to.
pub trait Renderer {
    /// Current bounding box of the interactive surface in client pixels.
    fn surface_bounds(&self) -> SurfaceRect;

    fn set_view_box(&mut self, view_box: &ViewBox);

    /// Called once per ring, in insertion order, before any arc is drawn.
    fn mount_ring(&mut self, index: RingIndex, track: &RingTrack);

    fn draw_arc(&mut self, index: RingIndex, path: &ArcPath, stroke_width: f64);

    fn set_legend_text(&mut self, index: RingIndex, text: &str);
}
