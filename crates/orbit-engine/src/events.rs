use crate::geometry::Point;

/// Signals a host forwards to the engine. Pointer positions are in client
/// pixels, the same space as [`crate::Renderer::surface_bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerStart(Point),
    PointerMove(Point),
    PointerStop,
    Resize,
}
