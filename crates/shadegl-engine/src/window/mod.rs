//! Native host: one winit window with an OpenGL context driving a [`Renderer`](crate::renderer::Renderer).

mod gl_window;
mod runtime;

pub use gl_window::GlWindow;
pub use runtime::{App, AppControl, GlRenderer, Runtime, RuntimeConfig};
