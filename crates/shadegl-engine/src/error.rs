//! Error taxonomy for the rendering core.
//!
//! Creation, compilation, linking and validation failures are fatal to the
//! operation that raised them and are returned to the immediate caller.
//! Attribute/uniform lookup misses are not errors; they surface as `None`.

use std::fmt;

use thiserror::Error;

use crate::pipeline::ShaderKind;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GlError>;

/// Driver object that failed to allocate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Resource {
    Shader(ShaderKind),
    Program,
    VertexBuffer,
    IndexBuffer,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Shader(kind) => write!(f, "{kind} shader"),
            Resource::Program => f.write_str("program"),
            Resource::VertexBuffer => f.write_str("vertex buffer"),
            Resource::IndexBuffer => f.write_str("index buffer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GlError {
    /// No rendering context could be acquired for the surface.
    #[error("rendering context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("failed to create {resource}: {reason}")]
    ResourceCreation { resource: Resource, reason: String },

    #[error("error compiling {kind} shader: {log}")]
    Compile { kind: ShaderKind, log: String },

    #[error("error linking program: {log}")]
    Link { log: String },

    #[error("error validating program: {log}")]
    Validation { log: String },

    /// An operation needed a linked, active program and none is active.
    #[error("no active program")]
    NoActiveProgram,

    #[error("no index buffer has been uploaded")]
    MissingIndexBuffer,

    /// Index data is uploaded as u16; values outside `0..=65535` or with a
    /// fractional part cannot be represented.
    #[error("index {value} does not fit an unsigned 16-bit index")]
    IndexOutOfRange { value: f64 },

    #[error("failed to load `{location}`: {reason}")]
    Source { location: String, reason: String },
}
