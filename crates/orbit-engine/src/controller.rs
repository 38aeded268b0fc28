use crate::geometry::{self, Point};
use crate::registry::RingRegistry;
use crate::ring::RingIndex;
use std::f64::consts::PI;

/// Extra grab margin around each stroke, in logical units.
pub const HIT_SLOP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(RingIndex),
}

/// Tracks which ring, if any, the pointer is dragging.
///
/// Positions handed to the controller are logical coordinates relative to
/// the ring center (see [`crate::SurfaceMapping::to_logical`]).
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: DragState,
    tolerance: f64,
    // unsnapped pointer angle; coarse steps would hide which side it is on
    last_angle: f64,
}

impl InteractionController {
    pub fn new(thickness: f64) -> Self {
        Self {
            state: DragState::Idle,
            tolerance: thickness / 2.0 + HIT_SLOP,
            last_angle: 0.0,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active_ring(&self) -> Option<RingIndex> {
        match self.state {
            DragState::Dragging(index) => Some(index),
            DragState::Idle => None,
        }
    }

    /// Hit-tests `pos` against the rings. On a hit, starts dragging and
    /// returns the ring with the angle it should jump to.
    pub fn start(&mut self, registry: &RingRegistry, pos: Point) -> Option<(RingIndex, f64)> {
        let r = pos.distance_from_origin();
        match registry.hit_test(r, self.tolerance) {
            Some(index) => {
                self.state = DragState::Dragging(index);
                log::debug!("Pointer at r={r:.1} grabbed ring {index}");
                self.last_angle = geometry::coords_to_angle(pos.x, pos.y);
                Some((index, self.last_angle))
            }
            None => {
                self.state = DragState::Idle;
                log::debug!("Pointer at r={r:.1} missed every ring");
                None
            }
        }
    }

    /// Angle for the active ring at `pos`, or `None` while idle.
    /// `px_to_logical` is the size of one client pixel in logical units.
    pub fn drag(&mut self, pos: Point, px_to_logical: f64) -> Option<(RingIndex, f64)> {
        let index = self.active_ring()?;
        let x = hold_wrap_side(pos, self.last_angle, px_to_logical);
        self.last_angle = geometry::coords_to_angle(x, pos.y);
        Some((index, self.last_angle))
    }

    pub fn stop(&mut self) {
        if self.state != DragState::Idle {
            log::debug!("Released ({})", self.state);
        }
        self.state = DragState::Idle;
    }
}

/// Keeps a drag across 12 o'clock from wrapping between the ends of the
/// range. In the upper half the x-coordinate is pushed at least `margin` to
/// the side the pointer was last on.
fn hold_wrap_side(pos: Point, last_angle: f64, margin: f64) -> f64 {
    if pos.y >= 0.0 {
        pos.x
    } else if last_angle > PI {
        pos.x.min(-margin)
    } else {
        pos.x.max(margin)
    }
}
