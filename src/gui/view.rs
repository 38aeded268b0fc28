use super::surface::{Scene, SceneRing};
use super::theme::ThemeColors;
use cairo::{Context, LineCap};
use orbit_engine::geometry::to_screen_angle;
use orbit_engine::{SurfaceMapping, SurfaceRect};
use palette::Srgba;
use std::f64::consts::TAU;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_track(cr: &Context, ring: &SceneRing, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let track = &ring.track;
    cr.save()?;
    set_source(cr, colors.track);
    cr.set_line_width(track.stroke_width);
    cr.set_dash(&[track.dash_length, 1.0], 0.0);
    cr.arc(
        0.0,
        0.0,
        track.path.radius,
        to_screen_angle(0.0),
        to_screen_angle(TAU),
    );
    cr.stroke()?;
    cr.restore()
}

fn draw_value(
    cr: &Context,
    ring: &SceneRing,
    handle_radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let Some(path) = ring.arc else {
        return Ok(());
    };

    let (r, g, b) = ring.track.color.components();
    cr.set_source_rgb(r, g, b);
    cr.set_line_width(ring.stroke_width);
    cr.new_path();
    cr.arc(
        0.0,
        0.0,
        path.radius,
        to_screen_angle(0.0),
        to_screen_angle(path.sweep),
    );
    cr.stroke()?;

    set_source(cr, colors.handle);
    cr.arc(path.end.x, path.end.y, handle_radius, 0.0, TAU);
    cr.fill()
}

/// Paints the rings fitted into `bounds` the same way pointer input is
/// mapped, so what is under the pointer is what gets hit.
pub fn draw(
    cr: &Context,
    scene: &Scene,
    bounds: SurfaceRect,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if scene.rings.is_empty() {
        return Ok(());
    }

    let mapping = SurfaceMapping::compute(bounds, &scene.view_box);
    cr.save()?;
    cr.translate(mapping.center.x, mapping.center.y);
    cr.scale(1.0 / mapping.px_to_logical, 1.0 / mapping.px_to_logical);
    cr.set_line_cap(LineCap::Butt);

    for ring in scene.rings.values() {
        draw_track(cr, ring, colors)?;
    }
    let handle_radius = scene.handle_radius();
    for ring in scene.rings.values() {
        draw_value(cr, ring, handle_radius, colors)?;
    }
    cr.restore()
}
