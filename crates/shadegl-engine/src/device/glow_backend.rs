use glow::HasContext;

use crate::locations::{AttributeLayout, ComponentType, UniformValue};
use crate::paint::Color;
use crate::pipeline::ShaderKind;

use super::backend::{BufferTarget, BufferUsage, Capability, Face, GlBackend, Winding};

type Gl = glow::Context;

/// [`GlBackend`] over a current `glow` context.
///
/// Owns one vertex array object bound for the lifetime of the backend. Core
/// profiles reject attribute setup without a bound VAO; WebGL1-class contexts
/// have none, in which case attribute state lives in the default context state.
pub struct GlowBackend {
    gl: Gl,
    vao: Option<<Gl as HasContext>::VertexArray>,
}

impl GlowBackend {
    /// Wraps `gl`. The context must be current on the calling thread.
    pub fn new(gl: Gl) -> Self {
        // SAFETY: the caller guarantees `gl` is current; every call below only
        // touches objects created here.
        let vao = unsafe {
            log::debug!("GL version: {}", gl.get_parameter_string(glow::VERSION));
            match gl.create_vertex_array() {
                Ok(vao) => {
                    gl.bind_vertex_array(Some(vao));
                    Some(vao)
                }
                Err(e) => {
                    log::debug!("no vertex array object available ({e}); using default state");
                    None
                }
            }
        };

        Self { gl, vao }
    }

    /// Raw context access for calls the seam does not cover.
    pub fn gl(&self) -> &Gl {
        &self.gl
    }
}

impl Drop for GlowBackend {
    fn drop(&mut self) {
        if let Some(vao) = self.vao.take() {
            // SAFETY: `vao` was created by this context and is no longer used.
            unsafe { self.gl.delete_vertex_array(vao) };
        }
    }
}

fn component_type(ty: ComponentType) -> u32 {
    match ty {
        ComponentType::Byte => glow::BYTE,
        ComponentType::UnsignedByte => glow::UNSIGNED_BYTE,
        ComponentType::Short => glow::SHORT,
        ComponentType::UnsignedShort => glow::UNSIGNED_SHORT,
        ComponentType::Float => glow::FLOAT,
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

// SAFETY (all methods): `GlowBackend` is only constructed from a current
// context, and the renderer only passes back handles this backend created.
impl GlBackend for GlowBackend {
    type Shader = <Gl as HasContext>::Shader;
    type Program = <Gl as HasContext>::Program;
    type Buffer = <Gl as HasContext>::Buffer;
    type UniformLocation = <Gl as HasContext>::UniformLocation;

    fn enable(&self, cap: Capability) {
        let cap = match cap {
            Capability::DepthTest => glow::DEPTH_TEST,
            Capability::CullFace => glow::CULL_FACE,
        };
        unsafe { self.gl.enable(cap) };
    }

    fn front_face(&self, winding: Winding) {
        let mode = match winding {
            Winding::Ccw => glow::CCW,
            Winding::Cw => glow::CW,
        };
        unsafe { self.gl.front_face(mode) };
    }

    fn cull_face(&self, face: Face) {
        let mode = match face {
            Face::Front => glow::FRONT,
            Face::Back => glow::BACK,
        };
        unsafe { self.gl.cull_face(mode) };
    }

    fn viewport(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
    }

    fn clear(&self, color: Color) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn create_shader(&self, kind: ShaderKind) -> Result<Self::Shader, String> {
        let ty = match kind {
            ShaderKind::Vertex => glow::VERTEX_SHADER,
            ShaderKind::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.gl.create_shader(ty) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) };
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) };
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) };
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) };
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) };
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    /// glow exposes no `glValidateProgram` entry point, so validation falls
    /// back to the link status: a program that linked is reported valid.
    fn validate_program(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) };
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) };
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn upload_buffer(
        &self,
        target: BufferTarget,
        buffer: Self::Buffer,
        bytes: &[u8],
        usage: BufferUsage,
    ) {
        let target = buffer_target(target);
        let usage = match usage {
            BufferUsage::StaticDraw => glow::STATIC_DRAW,
        };
        unsafe {
            self.gl.bind_buffer(target, Some(buffer));
            self.gl.buffer_data_u8_slice(target, bytes, usage);
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) };
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn vertex_attrib_pointer(&self, slot: u32, layout: &AttributeLayout) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                slot,
                layout.components as i32,
                component_type(layout.component_type),
                layout.normalized,
                layout.stride as i32,
                layout.offset as i32,
            );
        }
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(slot) };
    }

    fn set_uniform(&self, location: &Self::UniformLocation, value: &UniformValue) {
        let loc = Some(location);
        unsafe {
            match *value {
                UniformValue::Float(x) => self.gl.uniform_1_f32(loc, x),
                UniformValue::Vec2([x, y]) => self.gl.uniform_2_f32(loc, x, y),
                UniformValue::Vec3([x, y, z]) => self.gl.uniform_3_f32(loc, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => self.gl.uniform_4_f32(loc, x, y, z, w),
                UniformValue::Int(v) => self.gl.uniform_1_i32(loc, v),
                UniformValue::Mat4(ref m) => self.gl.uniform_matrix_4_f32_slice(loc, false, m),
            }
        }
    }

    fn draw_triangles_u16(&self, count: usize) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count as i32, glow::UNSIGNED_SHORT, 0);
        }
    }
}
