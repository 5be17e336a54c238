use std::fmt;

use crate::device::GlBackend;
use crate::error::{GlError, Resource, Result};

/// Pipeline stage a shader unit belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        })
    }
}

/// A compiled shader stage and the source it was built from.
#[derive(Debug, Clone)]
pub struct ShaderUnit<S> {
    pub handle: S,
    pub source: String,
    pub kind: ShaderKind,
}

/// Creates, sources and compiles one shader stage.
///
/// On a compile failure the new shader object is deleted before the error is
/// returned, so no failed unit outlives the call.
pub(crate) fn compile<B: GlBackend>(
    backend: &B,
    kind: ShaderKind,
    source: &str,
) -> Result<ShaderUnit<B::Shader>> {
    let handle = backend
        .create_shader(kind)
        .map_err(|reason| GlError::ResourceCreation {
            resource: Resource::Shader(kind),
            reason,
        })?;

    backend.shader_source(handle, source);
    backend.compile_shader(handle);

    if !backend.shader_compile_status(handle) {
        let log = backend.shader_info_log(handle);
        backend.delete_shader(handle);
        return Err(GlError::Compile { kind, log });
    }

    log::debug!("compiled {kind} shader ({} bytes)", source.len());

    Ok(ShaderUnit {
        handle,
        source: source.to_owned(),
        kind,
    })
}
