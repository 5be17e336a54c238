use crate::device::GlBackend;
use crate::error::{GlError, Resource, Result};

/// A linked and validated program.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Program<P> {
    pub handle: P,
}

/// Links `vertex` and `fragment` into a new program, then validates it.
///
/// The program is not activated here. On failure the program object is
/// deleted and the driver log is returned with the error.
pub(crate) fn link<B: GlBackend>(
    backend: &B,
    vertex: B::Shader,
    fragment: B::Shader,
) -> Result<Program<B::Program>> {
    let handle = backend
        .create_program()
        .map_err(|reason| GlError::ResourceCreation {
            resource: Resource::Program,
            reason,
        })?;

    backend.attach_shader(handle, vertex);
    backend.attach_shader(handle, fragment);

    backend.link_program(handle);
    if !backend.program_link_status(handle) {
        let log = backend.program_info_log(handle);
        backend.delete_program(handle);
        return Err(GlError::Link { log });
    }

    if !backend.validate_program(handle) {
        let log = backend.program_info_log(handle);
        backend.delete_program(handle);
        return Err(GlError::Validation { log });
    }

    Ok(Program { handle })
}
