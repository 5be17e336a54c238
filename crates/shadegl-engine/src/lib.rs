//! shadegl engine crate.
//!
//! A small rendering core over an immediate-mode OpenGL-style API: one
//! context bound to one surface, a two-stage shader program, a vertex and an
//! index buffer, cached attribute/uniform locations and a per-frame callback.
//!
//! [`renderer::Renderer`] is generic over the driver ([`device::GlBackend`])
//! and the drawing target ([`device::Surface`]); [`window`] provides the
//! native winit + glutin pair.

pub mod buffer;
pub mod device;
pub mod error;
pub mod geometry;
pub mod locations;
pub mod logging;
pub mod paint;
pub mod pipeline;
pub mod renderer;
pub mod time;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{GlError, Result};
pub use renderer::{FrameCallback, Renderer};
