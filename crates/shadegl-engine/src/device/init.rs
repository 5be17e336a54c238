use crate::paint::Color;

use super::backend::Winding;

/// Initial context state applied by `Renderer::new`.
///
/// Defaults match the common case for a single full-surface effect: depth
/// testing on, back faces culled, counter-clockwise front faces, opaque black
/// clear.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Color the surface is cleared to right after initialization.
    pub clear_color: Color,

    pub depth_test: bool,

    /// Cull back-facing triangles.
    pub cull_back_faces: bool,

    /// Winding that marks a triangle as front-facing.
    pub front_face: Winding,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            depth_test: true,
            cull_back_faces: true,
            front_face: Winding::Ccw,
        }
    }
}
