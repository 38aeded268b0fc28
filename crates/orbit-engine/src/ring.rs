use crate::error::{ColorParseError, ConfigurationError};
use crate::geometry::{self, ArcPath};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{FromColor, Hsl, Srgb};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct RingId(String);

crate::impl_string_newtype!(RingId);

/// Position of a ring in its registry. Assigned at insertion and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct RingIndex(usize);

impl RingIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

// hue distance between consecutive generated colors
const GOLDEN_ANGLE: f32 = 137.507_77;

#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct RingColor(Srgb<u8>);

impl RingColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Fallback color for the ring at `index` when none is configured.
    pub fn for_index(index: usize) -> Self {
        let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
        let hsl: Hsl = Hsl::new(hue, 1.0, 0.45);
        let rgb: Srgb = Srgb::from_color(hsl);
        Self(rgb.into_format())
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.0
    }

    /// Channels in `0.0..=1.0`, as cairo expects them.
    pub fn components(&self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }
}

impl fmt::Display for RingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

impl FromStr for RingColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|_| ColorParseError {
                input: s.to_string(),
            })
    }
}

/// Caller-supplied description of one slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RingId>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<RingColor>,
    pub label: String,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            id: None,
            min: 0.0,
            max: 100.0,
            step: 1.0,
            value: 0.0,
            color: None,
            label: String::new(),
        }
    }
}

impl RingConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(RingId::new(id)),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_color(mut self, color: RingColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, n) in [
            ("min", self.min),
            ("max", self.max),
            ("step", self.step),
            ("value", self.value),
        ] {
            if !n.is_finite() {
                return Err(ConfigurationError::NonFinite { field });
            }
        }

        let (min, max, step, value) = (self.min, self.max, self.step, self.value);
        if min >= max {
            return Err(ConfigurationError::EmptyRange { min, max });
        }
        if step <= 0.0 {
            return Err(ConfigurationError::NonPositiveStep(step));
        }
        if step > max - min {
            return Err(ConfigurationError::StepExceedsRange { step, min, max });
        }
        if !((max - min) / step).is_finite() {
            return Err(ConfigurationError::TooManySteps { step, min, max });
        }
        if value < min {
            return Err(ConfigurationError::ValueBelowMin { value, min });
        }
        if value > max {
            return Err(ConfigurationError::ValueAboveMax { value, max });
        }
        Ok(())
    }
}

/// A registered slider with its precomputed drawing constants.
#[derive(Debug, Clone)]
pub struct Ring {
    index: RingIndex,
    id: RingId,
    min: f64,
    max: f64,
    step: f64,
    value: f64,
    color: RingColor,
    label: String,
    radius: f64,
    value_to_angle_ratio: f64,
    step_to_angle_ratio: f64,
    angle_to_value_ratio: f64,
    current_angle: f64,
    display_decimals: usize,
}

impl Ring {
    /// Builds a ring from an already validated config. The initial value is
    /// snapped like any later update.
    pub(crate) fn new(
        index: RingIndex,
        id: RingId,
        config: &RingConfig,
        color: RingColor,
        radius: f64,
    ) -> Self {
        let range = config.max - config.min;
        let mut ring = Self {
            index,
            id,
            min: config.min,
            max: config.max,
            step: config.step,
            value: config.value,
            color,
            label: config.label.clone(),
            radius,
            value_to_angle_ratio: TAU / range,
            step_to_angle_ratio: TAU / (range / config.step),
            angle_to_value_ratio: range / TAU,
            current_angle: 0.0,
            display_decimals: geometry::step_decimals(config.step),
        };
        ring.snap_to(ring.angle_for_value(config.value));
        ring
    }

    /// Snaps `raw_angle` to the step grid and commits the result. Returns
    /// `true` when the stored value changed.
    pub(crate) fn snap_to(&mut self, raw_angle: f64) -> bool {
        let angle = geometry::snap_angle_to_step(raw_angle, self.step_to_angle_ratio);
        let value = geometry::angle_to_value(
            angle,
            self.angle_to_value_ratio,
            self.min,
            self.display_decimals,
        );
        let changed = value != self.value;
        self.current_angle = angle;
        self.value = value;
        changed
    }

    pub fn angle_for_value(&self, value: f64) -> f64 {
        geometry::value_to_angle(
            value.clamp(self.min, self.max),
            self.min,
            self.value_to_angle_ratio,
        )
    }

    pub fn arc_path(&self) -> ArcPath {
        geometry::draw_arc_path(self.current_angle, self.radius)
    }

    pub fn legend_text(&self) -> String {
        geometry::format_value(self.value, self.display_decimals)
    }

    pub fn track_dash_length(&self) -> f64 {
        geometry::track_dash_length(self.step_to_angle_ratio, self.radius)
    }

    pub fn index(&self) -> RingIndex {
        self.index
    }

    pub fn id(&self) -> &RingId {
        &self.id
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> RingColor {
        self.color
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn step_angle(&self) -> f64 {
        self.step_to_angle_ratio
    }

    pub fn display_decimals(&self) -> usize {
        self.display_decimals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_configs() {
        let cases = [
            (
                RingConfig::new("a").with_range(0.0, 10.0).with_value(-1.0),
                ConfigurationError::ValueBelowMin {
                    value: -1.0,
                    min: 0.0,
                },
            ),
            (
                RingConfig::new("a").with_range(5.0, 5.0),
                ConfigurationError::EmptyRange { min: 5.0, max: 5.0 },
            ),
            (
                RingConfig::new("a").with_step(0.0),
                ConfigurationError::NonPositiveStep(0.0),
            ),
            (
                RingConfig::new("a").with_range(0.0, 10.0).with_step(20.0),
                ConfigurationError::StepExceedsRange {
                    step: 20.0,
                    min: 0.0,
                    max: 10.0,
                },
            ),
            (
                RingConfig::new("a").with_value(101.0),
                ConfigurationError::ValueAboveMax {
                    value: 101.0,
                    max: 100.0,
                },
            ),
            (
                RingConfig::new("a").with_step(1e-310),
                ConfigurationError::TooManySteps {
                    step: 1e-310,
                    min: 0.0,
                    max: 100.0,
                },
            ),
            (
                RingConfig::new("a").with_value(f64::NAN),
                ConfigurationError::NonFinite { field: "value" },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
        assert_eq!(RingConfig::new("ok").validate(), Ok(()));
    }

    #[test]
    fn test_ring_derived_constants() {
        let config = RingConfig::new("x")
            .with_range(-10.0, 10.0)
            .with_step(0.5)
            .with_value(5.0);
        let ring = Ring::new(
            RingIndex::from(0),
            RingId::from("x"),
            &config,
            RingColor::new(0, 0, 0),
            80.0,
        );

        assert_eq!(ring.display_decimals(), 1);
        assert!((ring.step_angle() - TAU / 40.0).abs() < 1e-12);
        assert_eq!(ring.value(), 5.0);
        assert!((ring.current_angle() - 0.75 * TAU).abs() < 1e-9);
        assert_eq!(ring.legend_text(), "5.0");
    }

    #[test]
    fn test_initial_min_value_parks_on_sentinel() {
        let ring = Ring::new(
            RingIndex::from(0),
            RingId::from("x"),
            &RingConfig::new("x"),
            RingColor::for_index(0),
            60.0,
        );
        assert_eq!(ring.value(), 0.0);
        assert_eq!(ring.current_angle(), geometry::ZERO_ANGLE);
        assert_eq!(ring.arc_path().segment_count(), 1);
    }

    #[test]
    fn test_color_parsing() {
        let color: RingColor = "#1e90ff".parse().unwrap();
        assert_eq!(color, RingColor::new(0x1e, 0x90, 0xff));
        assert_eq!(color.to_string(), "#1e90ff");

        let short: RingColor = "fff".parse().unwrap();
        assert_eq!(short, RingColor::new(255, 255, 255));

        assert!("not-a-color".parse::<RingColor>().is_err());
    }

    #[test]
    fn test_generated_colors_differ() {
        let a = RingColor::for_index(0);
        let b = RingColor::for_index(1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_ring_config_deserialization() {
        let json = r##"{"id": "volume", "max": 11, "color": "#ff0000", "label": "Vol"}"##;
        let config: RingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.id, Some(RingId::from("volume")));
        assert_eq!(config.min, 0.0);
        assert_eq!(config.max, 11.0);
        assert_eq!(config.step, 1.0);
        assert_eq!(config.color, Some(RingColor::new(255, 0, 0)));
        assert_eq!(config.label, "Vol");
    }
}
