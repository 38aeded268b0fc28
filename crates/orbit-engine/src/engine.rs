use crate::config::EngineConfig;
use crate::controller::{DragState, InteractionController};
use crate::error::EngineError;
use crate::events::InputEvent;
use crate::frame::FrameRequests;
use crate::geometry::ViewBox;
use crate::listeners::{Listeners, Unsubscribe};
use crate::registry::{Redraw, RingMoved, RingRegistry, RingValue};
use crate::render::{Renderer, RingTrack};
use crate::ring::{Ring, RingConfig, RingId, RingIndex};
use crate::surface::SurfaceMapping;

/// Concentric radial sliders driven by pointer input.
///
/// The engine owns the rings and the drag state. Drawing happens through the
/// [`Renderer`] and is batched: state changes queue work that runs on the
/// next [`Engine::flush_frame`].
pub struct Engine<R: Renderer> {
    config: EngineConfig,
    registry: RingRegistry,
    controller: InteractionController,
    mapping: SurfaceMapping,
    frame: FrameRequests,
    listeners: Listeners,
    renderer: R,
}

impl<R: Renderer> Engine<R> {
    pub fn new(
        renderer: R,
        rings: impl IntoIterator<Item = RingConfig>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let mut frame = FrameRequests::default();
        frame.request_remap();

        let mut engine = Self {
            config,
            registry: RingRegistry::new(&config),
            controller: InteractionController::new(config.thickness),
            mapping: SurfaceMapping::default(),
            frame,
            listeners: Listeners::default(),
            renderer,
        };
        for ring in rings {
            engine.append_ring(ring)?;
        }
        Ok(engine)
    }

    pub fn append_ring(&mut self, config: RingConfig) -> Result<RingId, EngineError> {
        let ring = self
            .registry
            .append(config)
            .inspect_err(|e| log::warn!("Rejected ring: {e}"))?;
        log::info!(
            "Registered ring {} at radius {} ({}..{} step {})",
            ring.id(),
            ring.radius(),
            ring.min(),
            ring.max(),
            ring.step()
        );

        self.renderer
            .mount_ring(ring.index(), &RingTrack::new(ring, self.config.thickness));
        self.frame.request_redraw(Redraw {
            index: ring.index(),
            path: ring.arc_path(),
            legend: ring.legend_text(),
        });
        // the drawing grew, so the pixel mapping is stale
        self.frame.request_view_box();
        self.frame.request_remap();
        Ok(ring.id().clone())
    }

    pub fn value(&self, id: &str) -> Option<f64> {
        self.registry.value(id)
    }

    pub fn values(&self) -> Vec<RingValue> {
        self.registry.values()
    }

    /// Moves a ring to the step nearest to `value`. Unknown ids are ignored.
    pub fn set_value(&mut self, id: &str, value: f64) {
        match self.registry.set_value(id, value) {
            Some(moved) => self.commit(moved),
            None => log::debug!("Ignoring value for unknown ring `{id}`"),
        }
    }

    /// Registers `callback` for committed value changes. The callback runs
    /// while the engine is borrowed and must not call back into it.
    pub fn on_change(&self, callback: impl Fn(&RingId, f64) + 'static) -> Unsubscribe {
        self.listeners.subscribe(callback)
    }

    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerStart(client) => {
                let pos = self.surface_mapping().to_logical(client);
                if let Some((index, angle)) = self.controller.start(&self.registry, pos) {
                    self.move_ring(index, angle);
                }
            }
            InputEvent::PointerMove(client) => {
                if self.controller.active_ring().is_none() {
                    return;
                }
                let mapping = self.surface_mapping();
                let pos = mapping.to_logical(client);
                if let Some((index, angle)) = self.controller.drag(pos, mapping.px_to_logical) {
                    self.move_ring(index, angle);
                }
            }
            InputEvent::PointerStop => self.controller.stop(),
            InputEvent::Resize => self.frame.request_remap(),
        }
    }

    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Runs the work queued since the last frame. Returns `false` when there
    /// was nothing to do.
    pub fn flush_frame(&mut self) -> bool {
        let frame = std::mem::take(&mut self.frame);
        if !frame.is_pending() {
            return false;
        }

        if frame.remap_surface {
            self.remap_surface();
        }
        if frame.view_box {
            self.renderer.set_view_box(&self.registry.view_box());
        }
        for redraw in frame.redraws.into_values() {
            self.renderer
                .draw_arc(redraw.index, &redraw.path, self.config.thickness);
            self.renderer.set_legend_text(redraw.index, &redraw.legend);
        }
        true
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_pending()
    }

    fn move_ring(&mut self, index: RingIndex, angle: f64) {
        if let Some(moved) = self.registry.move_ring(index, angle) {
            self.commit(moved);
        }
    }

    fn commit(&mut self, moved: RingMoved) {
        let RingMoved {
            redraw,
            value_changed,
        } = moved;
        if value_changed && let Some(ring) = self.registry.get(redraw.index) {
            self.listeners.notify(ring.id(), ring.value());
        }
        self.frame.request_redraw(redraw);
    }

    fn surface_mapping(&mut self) -> SurfaceMapping {
        if self.frame.remap_surface {
            self.frame.remap_surface = false;
            self.remap_surface();
        }
        self.mapping
    }

    fn remap_surface(&mut self) {
        let bounds = self.renderer.surface_bounds();
        self.mapping = SurfaceMapping::compute(bounds, &self.registry.view_box());
        log::trace!("Surface remapped: {:?}", self.mapping);
    }

    pub fn drag_state(&self) -> DragState {
        self.controller.state()
    }

    pub fn view_box(&self) -> ViewBox {
        self.registry.view_box()
    }

    pub fn ring(&self, id: &str) -> Option<&Ring> {
        self.registry
            .position(id)
            .and_then(|index| self.registry.get(index))
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.registry.iter().map(|(_, ring)| ring)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

pub fn create_engine<R: Renderer>(
    renderer: R,
    rings: impl IntoIterator<Item = RingConfig>,
    config: Option<EngineConfig>,
) -> Result<Engine<R>, EngineError> {
    Engine::new(renderer, rings, config.unwrap_or_default())
}
