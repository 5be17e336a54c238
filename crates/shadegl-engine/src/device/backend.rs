use std::fmt;

use crate::locations::{AttributeLayout, UniformValue};
use crate::paint::Color;
use crate::pipeline::ShaderKind;

/// Winding order that identifies front-facing triangles.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Winding {
    Ccw,
    Cw,
}

/// Which faces are discarded when culling is enabled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Face {
    Front,
    Back,
}

/// Fixed-function state toggled at context setup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Capability {
    DepthTest,
    CullFace,
}

/// Binding point a buffer is uploaded to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Element indices for indexed draws.
    ElementArray,
}

/// Usage hint passed with a buffer upload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    StaticDraw,
}

/// Immediate-mode driver seam.
///
/// Every call acts on the driver's current state: the program last passed to
/// [`use_program`](Self::use_program) and the buffers last bound by
/// [`upload_buffer`](Self::upload_buffer). [`Renderer`](crate::renderer::Renderer)
/// is the only caller and keeps that state consistent.
///
/// Handles are plain copyable ids; the backend never frees them on its own.
pub trait GlBackend {
    type Shader: Copy + Eq + fmt::Debug;
    type Program: Copy + Eq + fmt::Debug;
    type Buffer: Copy + Eq + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    // ── fixed-function state ──────────────────────────────────────────────

    fn enable(&self, cap: Capability);
    fn front_face(&self, winding: Winding);
    fn cull_face(&self, face: Face);
    fn viewport(&self, width: u32, height: u32);

    /// Sets the clear color and clears color and depth.
    fn clear(&self, color: Color);

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, kind: ShaderKind) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;

    /// Checks that the program can execute in the current state.
    fn validate_program(&self, program: Self::Program) -> bool;

    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;

    /// Binds `buffer` to `target` and replaces its contents with `bytes`.
    fn upload_buffer(
        &self,
        target: BufferTarget,
        buffer: Self::Buffer,
        bytes: &[u8],
        usage: BufferUsage,
    );

    fn delete_buffer(&self, buffer: Self::Buffer);

    // ── locations ─────────────────────────────────────────────────────────

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// Describes how the bound array buffer feeds attribute `slot`.
    fn vertex_attrib_pointer(&self, slot: u32, layout: &AttributeLayout);
    fn enable_vertex_attrib_array(&self, slot: u32);
    fn set_uniform(&self, location: &Self::UniformLocation, value: &UniformValue);

    // ── draws ─────────────────────────────────────────────────────────────

    /// Triangle list over the bound element buffer, u16 indices, offset 0.
    fn draw_triangles_u16(&self, count: usize);
}
