//! GPU buffer management.
//!
//! Callers hand over nested numeric data; it is flattened depth-first,
//! converted to the role's element type (f32 vertices, u16 indices) and
//! uploaded with a static usage hint. Both forms are retained.

pub(crate) mod gpu_buffer;
mod nested;

pub use gpu_buffer::{BufferElement, GpuBuffer, IndexBuffer, VertexBuffer};
pub use nested::Nested;
