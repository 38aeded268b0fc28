use crate::registry::Redraw;
use crate::ring::RingIndex;
use std::collections::BTreeMap;

/// Work queued for the next frame tick. Every request is idempotent, so
/// queuing the same thing twice costs nothing.
#[derive(Debug, Clone, Default)]
pub struct FrameRequests {
    pub(crate) remap_surface: bool,
    pub(crate) view_box: bool,
    pub(crate) redraws: BTreeMap<RingIndex, Redraw>,
}

impl FrameRequests {
    pub fn request_remap(&mut self) {
        self.remap_surface = true;
    }

    pub fn request_view_box(&mut self) {
        self.view_box = true;
    }

    /// Queues a ring redraw, replacing an older one for the same ring.
    pub fn request_redraw(&mut self, redraw: Redraw) {
        self.redraws.insert(redraw.index, redraw);
    }

    pub fn is_pending(&self) -> bool {
        self.remap_surface || self.view_box || !self.redraws.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::draw_arc_path;

    fn redraw(index: usize, legend: &str) -> Redraw {
        Redraw {
            index: RingIndex::from(index),
            path: draw_arc_path(1.0, 50.0),
            legend: legend.to_string(),
        }
    }

    #[test]
    fn test_latest_redraw_wins() {
        let mut frame = FrameRequests::default();
        assert!(!frame.is_pending());

        frame.request_redraw(redraw(0, "1"));
        frame.request_redraw(redraw(1, "7"));
        frame.request_redraw(redraw(0, "2"));

        assert!(frame.is_pending());
        let legends: Vec<&str> = frame.redraws.values().map(|r| r.legend.as_str()).collect();
        assert_eq!(legends, vec!["2", "7"]);
    }
}
