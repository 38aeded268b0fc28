use crate::geometry::{Point, ViewBox};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn square(size: f64) -> Self {
        Self::new(0.0, 0.0, size, size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    pub center: Point,
    pub px_to_logical: f64,
}

impl Default for SurfaceMapping {
    fn default() -> Self {
        Self {
            center: Point::default(),
            px_to_logical: 1.0,
        }
    }
}

impl SurfaceMapping {
    /// Fits `view_box` into `bounds`, centered, scaled by the shorter side.
    pub fn compute(bounds: SurfaceRect, view_box: &ViewBox) -> Self {
        let half_width = (bounds.width / 2.0).round();
        let half_height = (bounds.height / 2.0).round();
        let half_side = half_width.min(half_height);

        let px_to_logical = if half_side > 0.0 {
            view_box.size / (half_side * 2.0)
        } else {
            1.0
        };

        Self {
            center: Point::new(
                bounds.x.round() + half_width,
                bounds.y.round() + half_height,
            ),
            px_to_logical,
        }
    }

    pub fn to_logical(&self, client: Point) -> Point {
        Point::new(
            (client.x - self.center.x) * self.px_to_logical,
            (client.y - self.center.y) * self.px_to_logical,
        )
    }

    pub fn to_client(&self, logical: Point) -> Point {
        Point::new(
            logical.x / self.px_to_logical + self.center.x,
            logical.y / self.px_to_logical + self.center.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_scales_to_view_box() {
        let view_box = ViewBox::for_outer_radius(80.0, 20.0);
        let mapping = SurfaceMapping::compute(SurfaceRect::new(10.0, 20.0, 400.0, 400.0), &view_box);

        assert_eq!(mapping.center, Point::new(210.0, 220.0));
        assert_eq!(mapping.px_to_logical, 0.5);
        assert_eq!(
            mapping.to_logical(Point::new(210.0, 380.0)),
            Point::new(0.0, 80.0)
        );
    }

    #[test]
    fn test_mapping_uses_shorter_side() {
        let view_box = ViewBox::for_outer_radius(80.0, 20.0);
        let mapping = SurfaceMapping::compute(SurfaceRect::new(0.0, 0.0, 600.0, 200.0), &view_box);

        assert_eq!(mapping.center, Point::new(300.0, 100.0));
        assert_eq!(mapping.px_to_logical, 1.0);
        let client = Point::new(350.0, 60.0);
        assert_eq!(mapping.to_client(mapping.to_logical(client)), client);
    }

    #[test]
    fn test_degenerate_surface_keeps_unit_scale() {
        let mapping = SurfaceMapping::compute(SurfaceRect::default(), &ViewBox::default());
        assert_eq!(mapping.px_to_logical, 1.0);
    }
}
