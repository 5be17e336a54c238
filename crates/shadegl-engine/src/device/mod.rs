//! Rendering context management.
//!
//! This module is responsible for:
//! - the driver seam (`GlBackend`) and its `glow` implementation
//! - the `Surface` contract a renderer draws into
//! - initial fixed-function state and viewport sizing

mod backend;
pub(crate) mod context;
mod glow_backend;
mod init;
mod surface;

pub use backend::{BufferTarget, BufferUsage, Capability, Face, GlBackend, Winding};
pub use glow_backend::GlowBackend;
pub use init::RendererConfig;
pub use surface::{BackingSize, Surface};
