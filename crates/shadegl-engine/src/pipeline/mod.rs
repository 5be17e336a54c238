//! Shader/program pipeline.
//!
//! Compiles vertex and fragment stages, links and validates them into a
//! program, and loads shader source text from files or URLs.

pub(crate) mod program;
pub(crate) mod shader;
mod source;

pub use program::Program;
pub use shader::{ShaderKind, ShaderUnit};
pub use source::{load_text, ShaderSources};
