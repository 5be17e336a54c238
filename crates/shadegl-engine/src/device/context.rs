use super::backend::{Capability, Face, GlBackend};
use super::init::RendererConfig;
use super::surface::{BackingSize, Surface};

/// Applies the fixed-function state selected in `config`.
pub(crate) fn apply_initial_state<B: GlBackend>(backend: &B, config: &RendererConfig) {
    if config.depth_test {
        backend.enable(Capability::DepthTest);
    }
    if config.cull_back_faces {
        backend.enable(Capability::CullFace);
        backend.front_face(config.front_face);
        backend.cull_face(Face::Back);
    }
}

/// Resizes the backing store to `client_size * device_pixel_ratio` and points
/// the viewport at it.
pub(crate) fn apply_resize<B: GlBackend, S: Surface>(backend: &B, surface: &mut S) -> BackingSize {
    let size = BackingSize::from_client(surface.client_size(), surface.device_pixel_ratio());

    if size != surface.backing_size() {
        log::debug!("backing store resized to {}x{}", size.width, size.height);
    }

    surface.set_backing_size(size);
    backend.viewport(size.width, size.height);
    size
}
