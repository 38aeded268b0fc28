//! Geometry and interaction engine for concentric radial sliders.
//!
//! Rings are appended to an [`Engine`], which hit-tests pointer input by
//! radius, snaps dragged angles to each ring's step grid and tells a
//! [`Renderer`] what to draw.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
mod listeners;
pub mod macros;
pub mod registry;
pub mod render;
pub mod ring;
pub mod surface;

pub use config::EngineConfig;
pub use controller::{DragState, HIT_SLOP, InteractionController};
pub use engine::{Engine, create_engine};
pub use error::{ColorParseError, ConfigurationError, DuplicateIdError, EngineError};
pub use events::InputEvent;
pub use geometry::{ArcPath, Point, ViewBox};
pub use listeners::Unsubscribe;
pub use registry::{Redraw, RingRegistry, RingValue};
pub use render::{Renderer, RingTrack, SvgRenderer};
pub use ring::{Ring, RingColor, RingConfig, RingId, RingIndex};
pub use surface::{SurfaceMapping, SurfaceRect};
