use gtk::prelude::*;
use gtk4 as gtk;
use orbit_engine::{RingIndex, RingTrack};
use std::collections::BTreeMap;

const SWATCH_SIZE: i32 = 12;

/// One row per ring below the drawing: color swatch, label and value.
pub struct Legend {
    container: gtk::Box,
    values: BTreeMap<RingIndex, gtk::Label>,
}

impl Legend {
    /// Takes over `container`, dropping rows left by a previous engine.
    pub fn new(container: gtk::Box) -> Self {
        while let Some(child) = container.first_child() {
            container.remove(&child);
        }
        Self {
            container,
            values: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, index: RingIndex, track: &RingTrack) {
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);

        let swatch = gtk::DrawingArea::new();
        swatch.set_content_width(SWATCH_SIZE);
        swatch.set_content_height(SWATCH_SIZE);
        swatch.set_valign(gtk::Align::Center);
        let (r, g, b) = track.color.components();
        swatch.set_draw_func(move |_, cr, width, height| {
            let radius = width.min(height) as f64 / 2.0;
            cr.set_source_rgb(r, g, b);
            cr.arc(
                width as f64 / 2.0,
                height as f64 / 2.0,
                radius,
                0.0,
                std::f64::consts::TAU,
            );
            if let Err(e) = cr.fill() {
                log::error!("Drawing error: {}", e);
            }
        });

        let name = if track.label.is_empty() {
            track.id.to_string()
        } else {
            track.label.clone()
        };
        let label = gtk::Label::new(Some(&name));
        label.set_hexpand(true);
        label.set_xalign(0.0);

        let value = gtk::Label::new(None);
        value.add_css_class("orbit-value");
        value.set_xalign(1.0);

        row.append(&swatch);
        row.append(&label);
        row.append(&value);
        self.container.append(&row);
        self.values.insert(index, value);
    }

    pub fn set_value(&self, index: RingIndex, text: &str) {
        if let Some(label) = self.values.get(&index) {
            label.set_text(text);
        }
    }
}
