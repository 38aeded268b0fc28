use crate::config::EngineConfig;
use crate::error::{DuplicateIdError, EngineError};
use crate::geometry::{ArcPath, ViewBox};
use crate::ring::{Ring, RingColor, RingConfig, RingId, RingIndex};
use serde::Serialize;

/// Drawing command for one ring: the new arc and its legend text.
#[derive(Debug, Clone, PartialEq)]
pub struct Redraw {
    pub index: RingIndex,
    pub path: ArcPath,
    pub legend: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingMoved {
    pub redraw: Redraw,
    pub value_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingValue {
    pub id: RingId,
    pub value: f64,
}

/// Append-only store of rings, ordered innermost to outermost.
#[derive(Debug, Clone, Default)]
pub struct RingRegistry {
    rings: Vec<Ring>,
    thickness: f64,
    spacing: f64,
    inner_radius: f64,
}

impl RingRegistry {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            rings: Vec::new(),
            thickness: config.thickness,
            spacing: config.ring_spacing,
            inner_radius: config.inner_radius,
        }
    }

    pub fn append(&mut self, config: RingConfig) -> Result<&Ring, EngineError> {
        config.validate()?;

        let id = match config.id.clone() {
            Some(id) if self.position(&id).is_some() => return Err(DuplicateIdError(id).into()),
            Some(id) => id,
            None => self.generate_id(),
        };

        let index = RingIndex::from(self.rings.len());
        let color = config
            .color
            .unwrap_or_else(|| RingColor::for_index(index.get()));
        let radius = self.radius_for(index);

        self.rings.push(Ring::new(index, id, &config, color, radius));
        Ok(&self.rings[index.get()])
    }

    fn generate_id(&self) -> RingId {
        (0..)
            .map(|n| RingId::new(format!("ring-{n}")))
            .find(|id| self.position(id).is_none())
            .unwrap_or_else(|| RingId::new(format!("ring-{}", self.rings.len())))
    }

    fn radius_for(&self, index: RingIndex) -> f64 {
        (self.thickness + self.spacing) * (index.get() + 1) as f64 + self.inner_radius
    }

    pub fn position(&self, id: &str) -> Option<RingIndex> {
        self.rings
            .iter()
            .position(|ring| ring.id().as_str() == id)
            .map(RingIndex::from)
    }

    pub fn get(&self, index: RingIndex) -> Option<&Ring> {
        self.rings.get(index.get())
    }

    pub fn value(&self, id: &str) -> Option<f64> {
        self.position(id)
            .and_then(|index| self.get(index))
            .map(Ring::value)
    }

    pub fn values(&self) -> Vec<RingValue> {
        self.rings
            .iter()
            .map(|ring| RingValue {
                id: ring.id().clone(),
                value: ring.value(),
            })
            .collect()
    }

    /// Sets a ring's value through the same snapping path as dragging.
    /// Unknown ids are ignored.
    pub fn set_value(&mut self, id: &str, value: f64) -> Option<RingMoved> {
        let index = self.position(id)?;
        let angle = self.get(index)?.angle_for_value(value);
        self.move_ring(index, angle)
    }

    pub fn move_ring(&mut self, index: RingIndex, raw_angle: f64) -> Option<RingMoved> {
        let ring = self.rings.get_mut(index.get())?;
        let value_changed = ring.snap_to(raw_angle);
        Some(RingMoved {
            redraw: Redraw {
                index,
                path: ring.arc_path(),
                legend: ring.legend_text(),
            },
            value_changed,
        })
    }

    /// First ring, innermost out, whose stroke lies within `tolerance` of `r`.
    pub fn hit_test(&self, r: f64, tolerance: f64) -> Option<RingIndex> {
        self.rings
            .iter()
            .position(|ring| ring.radius() - tolerance < r && ring.radius() + tolerance > r)
            .map(RingIndex::from)
    }

    pub fn view_box(&self) -> ViewBox {
        self.rings
            .last()
            .map(|ring| ViewBox::for_outer_radius(ring.radius(), self.thickness))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RingIndex, &Ring)> {
        self.rings
            .iter()
            .enumerate()
            .map(|(i, ring)| (RingIndex::from(i), ring))
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}
