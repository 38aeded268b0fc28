//! Conversions between value space, angle space and the shared logical
//! coordinate system, plus SVG path synthesis for ring arcs.
//!
//! Angles are radians measured clockwise from 12 o'clock. Coordinates are
//! display coordinates centered on the rings: x grows to the right, y grows
//! downward.

use std::f64::consts::{PI, TAU};
use std::fmt;

/// Smallest angle a snapped ring can hold. A zero sweep would draw as a full
/// circle, so the bottom of the range is parked here instead.
pub const ZERO_ANGLE: f64 = 0.001;

// x-coordinates closer to zero than this are treated as the vertical axis
const AXIS_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

pub fn value_to_angle(value: f64, min: f64, value_to_angle_ratio: f64) -> f64 {
    (value - min) * value_to_angle_ratio
}

pub fn coords_to_angle(x: f64, y: f64) -> f64 {
    let raw = x.atan2(-y);
    let angle = if raw < 0.0 { raw + TAU } else { raw };
    // raw values a hair below zero round up to a full turn
    if angle >= TAU { 0.0 } else { angle }
}

pub fn angle_to_coords(angle: f64, radius: f64) -> Point {
    Point::new(angle.sin() * radius, -(angle.cos() * radius))
}

/// Moves `angle` to the nearest multiple of `step_angle`, ties going down.
///
/// The result stays within `[ZERO_ANGLE, 2π]`.
pub fn snap_angle_to_step(angle: f64, step_angle: f64) -> f64 {
    let remainder = angle % step_angle;
    let floor = angle - remainder;
    if remainder > step_angle / 2.0 {
        (floor + step_angle).min(TAU)
    } else {
        floor.max(ZERO_ANGLE)
    }
}

pub fn angle_to_value(
    angle: f64,
    angle_to_value_ratio: f64,
    min: f64,
    display_decimals: usize,
) -> f64 {
    let offset = if angle == ZERO_ANGLE {
        0.0
    } else {
        angle * angle_to_value_ratio
    };
    round_to_decimals(offset + min, display_decimals)
}

pub fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // past f64 precision there is nothing left to round
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

pub fn step_decimals(step: f64) -> usize {
    step.to_string()
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Length of one dash of a ring's background track. Dashes are one step
/// long, minus the unit gap that follows them.
pub fn track_dash_length(step_angle: f64, radius: f64) -> f64 {
    let dash = step_angle * radius;
    // very short dashes read as a solid line
    let dash = if dash < 10.0 { dash * 10.0 } else { dash };
    dash - 1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSweep {
    Single,
    Split,
}

/// Arc of a ring from 12 o'clock clockwise to `sweep`.
///
/// `Display` renders the SVG path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub radius: f64,
    pub sweep: f64,
    pub end: Point,
    pub kind: ArcSweep,
}

impl ArcPath {
    pub fn segment_count(&self) -> usize {
        match self.kind {
            ArcSweep::Single => 1,
            ArcSweep::Split => 2,
        }
    }

    pub fn full_circle(radius: f64) -> Self {
        draw_arc_path(TAU, radius)
    }
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.radius;
        let Point { x, y } = self.end;
        match self.kind {
            ArcSweep::Single => write!(f, "M0 {}A{r} {r} 0 0 1 {x:.2} {y:.2}", -r),
            ArcSweep::Split => write!(
                f,
                "M0 {}A{r} {r} 0 0 1 0 {r}A{r},{r} 0 0 1 {x:.2},{y:.2}",
                -r
            ),
        }
    }
}

pub fn draw_arc_path(angle: f64, radius: f64) -> ArcPath {
    let end = angle_to_coords(angle, radius);
    let kind = if end.x > AXIS_TOLERANCE * radius.max(1.0) {
        ArcSweep::Single
    } else {
        ArcSweep::Split
    };
    ArcPath {
        radius,
        sweep: angle,
        end,
        kind,
    }
}

pub fn handle_radius(stroke_width: f64) -> f64 {
    (stroke_width / 2.0).ceil().max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub offset: f64,
    pub size: f64,
}

impl ViewBox {
    pub fn for_outer_radius(radius: f64, thickness: f64) -> Self {
        let size = (radius + thickness) * 2.0;
        Self {
            offset: size / -2.0,
            size,
        }
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            offset: -1.0,
            size: 2.0,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.offset, self.offset, self.size, self.size
        )
    }
}

/// Converts a ring angle to cairo's convention (0 at 3 o'clock).
pub fn to_screen_angle(angle: f64) -> f64 {
    angle - PI / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_coords_to_angle_cardinal_points() {
        let cases = [
            ((0.0, -1.0), 0.0),
            ((1.0, 0.0), FRAC_PI_2),
            ((0.0, 1.0), PI),
            ((-1.0, 0.0), 3.0 * FRAC_PI_2),
        ];

        for ((x, y), expected) in cases {
            let angle = coords_to_angle(x, y);
            assert!(
                (angle - expected).abs() < EPS,
                "({x}, {y}) -> {angle}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_coords_to_angle_stays_in_range() {
        for i in 0..720 {
            let theta = i as f64 * TAU / 720.0;
            for radius in [0.5, 1.0, 250.0] {
                let p = angle_to_coords(theta, radius);
                let angle = coords_to_angle(p.x, p.y);
                assert!((0.0..TAU).contains(&angle), "{angle} out of range");
            }
        }
        let left_bottom = coords_to_angle(-0.0, 1.0);
        assert!((0.0..TAU).contains(&left_bottom));
    }

    #[test]
    fn test_angle_to_coords_inverts_coords_to_angle() {
        let p = angle_to_coords(FRAC_PI_2, 80.0);
        assert!((p.x - 80.0).abs() < EPS);
        assert!(p.y.abs() < EPS);

        let p = angle_to_coords(PI, 80.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 80.0).abs() < EPS);

        let angle = coords_to_angle(p.x, p.y);
        assert!((angle - PI).abs() < EPS);
    }

    #[test]
    fn test_snap_rounds_to_nearest_step() {
        let step = FRAC_PI_2;
        let up = snap_angle_to_step(PI / 4.0 + 0.01, step);
        assert!((up - FRAC_PI_2).abs() < EPS);

        let down = snap_angle_to_step(PI / 4.0 - 0.01, step);
        assert_eq!(down, ZERO_ANGLE);
    }

    #[test]
    fn test_snap_never_returns_zero() {
        for angle in [0.0, 1e-6, 0.0005, TAU / 20.0 / 2.0] {
            let snapped = snap_angle_to_step(angle, TAU / 20.0);
            assert!(snapped > 0.0);
        }
    }

    #[test]
    fn test_snap_clamps_to_full_turn() {
        let step = TAU / 3.0;
        let snapped = snap_angle_to_step(TAU - 0.01, step);
        assert!(snapped <= TAU);
        assert!((snapped - TAU).abs() < 1e-6);
    }

    #[test]
    fn test_angle_to_value_treats_sentinel_as_min() {
        let ratio = 100.0 / TAU;
        assert_eq!(angle_to_value(ZERO_ANGLE, ratio, 20.0, 0), 20.0);
        assert_eq!(angle_to_value(PI, ratio, 0.0, 0), 50.0);
    }

    #[test]
    fn test_value_angle_round_trip() {
        let cases = [
            (0.0, 100.0, 1.0),
            (-50.0, 50.0, 5.0),
            (0.0, 1.0, 0.1),
            (10.0, 12.5, 0.25),
        ];

        for (min, max, step) in cases {
            let range: f64 = max - min;
            let decimals = step_decimals(step);
            let value_ratio = TAU / range;
            let angle_ratio = range / TAU;
            let steps = (range / step).round() as usize;
            for i in 1..=steps {
                let value = round_to_decimals(min + i as f64 * step, decimals);
                let angle = value_to_angle(value, min, value_ratio);
                let back = angle_to_value(angle, angle_ratio, min, decimals);
                assert!(
                    (back - value).abs() < step / 2.0,
                    "{value} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn test_step_decimals() {
        assert_eq!(step_decimals(1.0), 0);
        assert_eq!(step_decimals(10.0), 0);
        assert_eq!(step_decimals(0.5), 1);
        assert_eq!(step_decimals(0.25), 2);
        assert_eq!(step_decimals(0.001), 3);
    }

    #[test]
    fn test_arc_path_segments() {
        for angle in [ZERO_ANGLE, 0.5, FRAC_PI_2, PI - 0.01] {
            assert_eq!(draw_arc_path(angle, 80.0).segment_count(), 1, "{angle}");
        }
        for angle in [PI, PI + 0.01, 3.0 * FRAC_PI_2, TAU - ZERO_ANGLE, TAU] {
            assert_eq!(draw_arc_path(angle, 80.0).segment_count(), 2, "{angle}");
        }
    }

    #[test]
    fn test_arc_path_serialization() {
        let quarter = draw_arc_path(FRAC_PI_2, 80.0).to_string();
        assert!(quarter.starts_with("M0 -80A80 80 0 0 1 80.00 "), "{quarter}");
        assert!(quarter.ends_with("0.00"));

        assert_eq!(
            draw_arc_path(3.0 * FRAC_PI_2, 80.0).to_string(),
            "M0 -80A80 80 0 0 1 0 80A80,80 0 0 1 -80.00,0.00"
        );
    }

    #[test]
    fn test_view_box_and_dash() {
        let view_box = ViewBox::for_outer_radius(80.0, 20.0);
        assert_eq!(view_box.to_string(), "-100 -100 200 200");

        assert_eq!(format!("{:.5}", track_dash_length(TAU / 10.0, 80.0)), "49.26548");
        // 100 steps on a radius of 80 gives ~5 units per dash
        assert_eq!(format!("{:.5}", track_dash_length(TAU / 100.0, 80.0)), "49.26548");

        assert_eq!(handle_radius(20.0), 10.0);
        assert_eq!(handle_radius(7.0), 4.0);
        assert_eq!(handle_radius(0.5), 1.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(50.0, 0), "50");
        assert_eq!(format_value(0.5, 2), "0.50");
    }

    #[test]
    fn test_round_to_decimals_beyond_precision() {
        assert_eq!(round_to_decimals(1.25, 1), 1.3);
        assert_eq!(round_to_decimals(42.0, 310), 42.0);
        assert_eq!(round_to_decimals(1e300, 20), 1e300);
    }
}
