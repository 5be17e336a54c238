//! Built-in geometry.

use crate::buffer::Nested;

/// Corners of the full surface in normalized device coordinates.
pub const SCREEN_VERTICES: [[[f32; 2]; 4]; 1] = [[[-1.0, 1.0], [1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]]];

/// Two counter-clockwise triangles covering [`SCREEN_VERTICES`].
pub const SCREEN_INDICES: [[[u16; 3]; 2]; 1] = [[[0, 2, 3], [3, 1, 0]]];

/// Full-screen quad for effects that shade every pixel of the surface.
///
/// Upload [`ScreenQuad::vertices`] and [`ScreenQuad::indices`], then bind the
/// position attribute as two floats per vertex.
pub struct ScreenQuad;

impl ScreenQuad {
    pub fn vertices() -> Nested {
        Nested::from(SCREEN_VERTICES)
    }

    pub fn indices() -> Nested {
        Nested::from(SCREEN_INDICES)
    }
}
