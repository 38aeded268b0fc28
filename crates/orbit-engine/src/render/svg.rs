use super::{Renderer, RingTrack};
use crate::geometry::{self, ArcPath, ViewBox};
use crate::ring::RingIndex;
use crate::surface::SurfaceRect;
use std::collections::BTreeMap;
use std::fmt;

const TRACK_COLOR: &str = "#e0e0e0";
const HANDLE_COLOR: &str = "#ffffff";

#[derive(Debug, Clone)]
struct SvgRing {
    track: RingTrack,
    arc: String,
    stroke_width: f64,
    legend: String,
}

/// Renders into a standalone SVG document. Works without a display, which
/// makes it the renderer of choice for exports and tests.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    bounds: SurfaceRect,
    view_box: ViewBox,
    rings: BTreeMap<RingIndex, SvgRing>,
}

impl SvgRenderer {
    pub fn new(bounds: SurfaceRect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Changes the reported surface size. The engine only notices after an
    /// [`crate::InputEvent::Resize`].
    pub fn set_bounds(&mut self, bounds: SurfaceRect) {
        self.bounds = bounds;
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    pub fn arc(&self, index: RingIndex) -> Option<&str> {
        self.rings.get(&index).map(|ring| ring.arc.as_str())
    }

    pub fn legend(&self, index: RingIndex) -> Option<&str> {
        self.rings.get(&index).map(|ring| ring.legend.as_str())
    }

    pub fn document(&self) -> String {
        self.to_string()
    }

    fn handle_size(&self) -> f64 {
        let widest = self
            .rings
            .values()
            .map(|ring| ring.track.stroke_width)
            .fold(0.0, f64::max);
        geometry::handle_radius(widest)
    }
}

impl Renderer for SvgRenderer {
    fn surface_bounds(&self) -> SurfaceRect {
        self.bounds
    }

    fn set_view_box(&mut self, view_box: &ViewBox) {
        self.view_box = *view_box;
    }

    fn mount_ring(&mut self, index: RingIndex, track: &RingTrack) {
        self.rings.insert(
            index,
            SvgRing {
                track: track.clone(),
                arc: String::new(),
                stroke_width: track.stroke_width,
                legend: String::new(),
            },
        );
    }

    fn draw_arc(&mut self, index: RingIndex, path: &ArcPath, stroke_width: f64) {
        if let Some(ring) = self.rings.get_mut(&index) {
            ring.arc = path.to_string();
            ring.stroke_width = stroke_width;
        }
    }

    fn set_legend_text(&mut self, index: RingIndex, text: &str) {
        if let Some(ring) = self.rings.get_mut(&index) {
            ring.legend = text.to_string();
        }
    }
}

impl fmt::Display for SvgRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="orbit" width="{}" height="{}" viewBox="{}" preserveAspectRatio="xMidYMid meet">"#,
            self.bounds.width, self.bounds.height, self.view_box
        )?;

        let s = self.handle_size();
        writeln!(
            f,
            r#"<defs><marker id="orbit-handle" viewBox="0 0 {box_size} {box_size}" refX="{center}" refY="{center}" markerWidth="{marker}" markerHeight="{marker}" markerUnits="userSpaceOnUse"><circle cx="{center}" cy="{center}" r="{s}" fill="{HANDLE_COLOR}"/></marker></defs>"#,
            box_size = s * 2.0 + 2.0,
            center = s + 1.0,
            marker = s * 2.0 + 6.0,
        )?;

        for ring in self.rings.values() {
            let track = &ring.track;
            writeln!(
                f,
                r#"<path class="orbit-track" fill="none" stroke="{TRACK_COLOR}" stroke-width="{}" stroke-dasharray="{}" d="{}"/>"#,
                track.stroke_width,
                track.dash_array(),
                track.path
            )?;
            if ring.arc.is_empty() {
                continue;
            }
            writeln!(
                f,
                r#"<path class="orbit-arc" data-id="{}" fill="none" stroke="{}" stroke-width="{}" marker-end="url(#orbit-handle)" d="{}"><title>{}</title></path>"#,
                escape_xml(track.id.as_str()),
                track.color,
                ring.stroke_width,
                ring.arc,
                escape_xml(&legend_line(&track.label, &ring.legend)),
            )?;
        }
        writeln!(f, "</svg>")
    }
}

fn legend_line(label: &str, value: &str) -> String {
    if label.is_empty() {
        value.to_string()
    } else {
        format!("{label}: {value}")
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::ring::RingConfig;

    #[test]
    fn test_document_contains_rings() {
        let rings = [
            RingConfig::new("bass").with_label("Bass <low>").with_value(25.0),
            RingConfig::new("treble").with_step(5.0),
        ];
        let mut engine = Engine::new(
            SvgRenderer::new(SurfaceRect::square(280.0)),
            rings,
            EngineConfig::default(),
        )
        .unwrap();
        engine.flush_frame();

        let doc = engine.renderer().document();
        assert!(doc.contains(r#"viewBox="-140 -140 280 280""#));
        assert_eq!(doc.matches(r#"class="orbit-track""#).count(), 2);
        assert_eq!(doc.matches(r#"class="orbit-arc""#).count(), 2);
        assert!(doc.contains("<title>Bass &lt;low&gt;: 25</title>"));
        assert!(doc.contains(r#"markerUnits="userSpaceOnUse""#));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_unmounted_ring_is_ignored() {
        let mut renderer = SvgRenderer::new(SurfaceRect::square(100.0));
        renderer.set_legend_text(RingIndex::from(3), "12");
        assert_eq!(renderer.legend(RingIndex::from(3)), None);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a&b "c" <d>"#), "a&amp;b &quot;c&quot; &lt;d&gt;");
    }
}
