//! The rendering core: one context, one surface, one active program.

use crate::buffer::{gpu_buffer, IndexBuffer, Nested, VertexBuffer};
use crate::device::context::{apply_initial_state, apply_resize};
use crate::device::{BackingSize, BufferTarget, GlBackend, RendererConfig, Surface};
use crate::error::{GlError, Result};
use crate::locations::{AttributeLayout, LocationCache, UniformValue};
use crate::paint::Color;
use crate::pipeline::{program, shader, Program, ShaderKind, ShaderSources, ShaderUnit};
use crate::time::{FrameLoop, LoopState};

/// Per-frame callback: receives the renderer and the milliseconds elapsed
/// since the previous frame.
pub type FrameCallback<B, S> = Box<dyn FnMut(&mut Renderer<B, S>, f64)>;

/// Owns a rendering context bound to one surface, plus everything built on it:
/// at most one shader unit per stage, one active program, one vertex and one
/// index buffer, the location cache and the frame loop.
///
/// Typical order of use:
/// 1. [`build_from_sources`](Self::build_from_sources)
/// 2. [`upload_vertex_buffer`](Self::upload_vertex_buffer) /
///    [`upload_index_buffer`](Self::upload_index_buffer)
/// 3. [`configure_attribute`](Self::configure_attribute)
/// 4. [`start`](Self::start) with a callback that calls
///    [`draw_elements`](Self::draw_elements)
///
/// Replaced driver objects (shaders, programs, buffers) are released by the
/// renderer; everything still live is released on drop.
pub struct Renderer<B: GlBackend, S: Surface> {
    backend: B,
    surface: S,
    config: RendererConfig,

    vertex_shader: Option<ShaderUnit<B::Shader>>,
    fragment_shader: Option<ShaderUnit<B::Shader>>,
    program: Option<Program<B::Program>>,

    vertex_buffer: Option<VertexBuffer<B::Buffer>>,
    index_buffer: Option<IndexBuffer<B::Buffer>>,

    /// Valid for `program` only; cleared whenever it changes.
    locations: LocationCache<B::UniformLocation>,

    frame_loop: FrameLoop<FrameCallback<B, S>>,
}

impl<B: GlBackend, S: Surface> Renderer<B, S> {
    /// Binds `backend` to `surface`, applies the initial state from `config`,
    /// sizes the viewport and clears to `config.clear_color`.
    pub fn new(backend: B, surface: S, config: RendererConfig) -> Self {
        apply_initial_state(&backend, &config);

        let mut renderer = Self {
            backend,
            surface,
            config,
            vertex_shader: None,
            fragment_shader: None,
            program: None,
            vertex_buffer: None,
            index_buffer: None,
            locations: LocationCache::new(),
            frame_loop: FrameLoop::new(),
        };

        let clear = renderer.config.clear_color;
        renderer.resize().background(clear);
        log::debug!("renderer initialized");
        renderer
    }

    // ── context ───────────────────────────────────────────────────────────

    /// Resizes the backing store to `client_size * device_pixel_ratio` and
    /// resets the viewport. Safe to call any number of times.
    pub fn resize(&mut self) -> &mut Self {
        apply_resize(&self.backend, &mut self.surface);
        self
    }

    /// Clears color and depth to `color`.
    pub fn background(&mut self, color: Color) -> &mut Self {
        self.backend.clear(color.clamped());
        self
    }

    pub fn backing_size(&self) -> BackingSize {
        self.surface.backing_size()
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ── shaders / program ─────────────────────────────────────────────────

    /// Compiles `source` as a `kind` stage and makes it the current unit of
    /// that stage, releasing the one it replaces.
    ///
    /// On failure the previous unit of that stage is left untouched.
    pub fn compile_shader(&mut self, kind: ShaderKind, source: &str) -> Result<B::Shader> {
        let unit = shader::compile(&self.backend, kind, source)?;
        let handle = unit.handle;

        let slot = match kind {
            ShaderKind::Vertex => &mut self.vertex_shader,
            ShaderKind::Fragment => &mut self.fragment_shader,
        };
        if let Some(old) = slot.replace(unit) {
            self.backend.delete_shader(old.handle);
        }

        Ok(handle)
    }

    /// Links and validates a program from two compiled stages, then makes it
    /// the active program.
    ///
    /// Activation releases the previous program and clears the location
    /// cache. On failure the previous program stays active.
    pub fn link_program(&mut self, vertex: B::Shader, fragment: B::Shader) -> Result<B::Program> {
        let linked = program::link(&self.backend, vertex, fragment)?;

        self.backend.use_program(Some(linked.handle));
        if let Some(old) = self.program.replace(linked) {
            self.backend.delete_program(old.handle);
        }
        self.locations.clear();

        log::debug!("program {:?} linked and active", linked.handle);
        Ok(linked.handle)
    }

    /// Compiles both stages and links them, stopping at the first failure.
    pub fn build_from_sources(&mut self, vertex: &str, fragment: &str) -> Result<B::Program> {
        let vs = self.compile_shader(ShaderKind::Vertex, vertex)?;
        let fs = self.compile_shader(ShaderKind::Fragment, fragment)?;
        self.link_program(vs, fs)
    }

    /// Loads both stages with [`ShaderSources::load`] and builds them.
    pub async fn build_from_files(&mut self, vertex: &str, fragment: &str) -> Result<B::Program> {
        let sources = ShaderSources::load(vertex, fragment).await?;
        self.build_from_sources(&sources.vertex, &sources.fragment)
    }

    pub fn vertex_shader(&self) -> Option<&ShaderUnit<B::Shader>> {
        self.vertex_shader.as_ref()
    }

    pub fn fragment_shader(&self) -> Option<&ShaderUnit<B::Shader>> {
        self.fragment_shader.as_ref()
    }

    pub fn program(&self) -> Option<Program<B::Program>> {
        self.program
    }

    // ── buffers ───────────────────────────────────────────────────────────

    /// Uploads `data` as f32 vertex data and binds it as the array buffer.
    /// Replaces (and releases) the previous vertex buffer.
    pub fn upload_vertex_buffer(&mut self, data: impl Into<Nested>) -> Result<B::Buffer> {
        let buffer = gpu_buffer::upload(&self.backend, BufferTarget::Array, data.into())?;
        let handle = buffer.handle;
        if let Some(old) = self.vertex_buffer.replace(buffer) {
            self.backend.delete_buffer(old.handle);
        }
        Ok(handle)
    }

    /// Uploads `data` as u16 indices and binds it as the element buffer.
    /// Replaces (and releases) the previous index buffer.
    ///
    /// Every index must be an integer in `0..=65535`; otherwise nothing is
    /// uploaded and [`GlError::IndexOutOfRange`] is returned.
    pub fn upload_index_buffer(&mut self, data: impl Into<Nested>) -> Result<B::Buffer> {
        let buffer = gpu_buffer::upload(&self.backend, BufferTarget::ElementArray, data.into())?;
        let handle = buffer.handle;
        if let Some(old) = self.index_buffer.replace(buffer) {
            self.backend.delete_buffer(old.handle);
        }
        Ok(handle)
    }

    pub fn vertex_buffer(&self) -> Option<&VertexBuffer<B::Buffer>> {
        self.vertex_buffer.as_ref()
    }

    pub fn index_buffer(&self) -> Option<&IndexBuffer<B::Buffer>> {
        self.index_buffer.as_ref()
    }

    // ── locations ─────────────────────────────────────────────────────────

    /// Attribute slot of `name` in the active program.
    ///
    /// `None` when there is no active program or the program has no such
    /// attribute.
    pub fn resolve_attribute(&mut self, name: &str) -> Option<u32> {
        let program = self.program?.handle;
        let backend = &self.backend;
        let slot = self
            .locations
            .attribute(name, |n| backend.attrib_location(program, n));

        if slot.is_none() {
            log::warn!("attribute `{name}` not found in active program");
        }
        slot
    }

    /// Uniform handle of `name` in the active program.
    pub fn resolve_uniform(&mut self, name: &str) -> Option<B::UniformLocation> {
        let program = self.program?.handle;
        let backend = &self.backend;
        let location = self
            .locations
            .uniform(name, |n| backend.uniform_location(program, n));

        if location.is_none() {
            log::warn!("uniform `{name}` not found in active program");
        }
        location
    }

    /// Points attribute `name` at the bound vertex buffer using `layout` and
    /// enables it. Returns the slot, or `None` if the attribute does not exist.
    pub fn configure_attribute(&mut self, name: &str, layout: AttributeLayout) -> Option<u32> {
        let slot = self.resolve_attribute(name)?;
        self.backend.vertex_attrib_pointer(slot, &layout);
        self.backend.enable_vertex_attrib_array(slot);
        Some(slot)
    }

    /// Uploads `value` to uniform `name`. Returns `false` on a lookup miss.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> bool {
        match self.resolve_uniform(name) {
            Some(location) => {
                self.backend.set_uniform(&location, &value);
                true
            }
            None => false,
        }
    }

    pub fn locations(&self) -> &LocationCache<B::UniformLocation> {
        &self.locations
    }

    // ── draws ─────────────────────────────────────────────────────────────

    /// Draws the uploaded index buffer as a triangle list from offset 0.
    pub fn draw_elements(&mut self) -> Result<&mut Self> {
        if self.program.is_none() {
            return Err(GlError::NoActiveProgram);
        }
        let count = self
            .index_buffer
            .as_ref()
            .ok_or(GlError::MissingIndexBuffer)?
            .len();

        self.backend.draw_triangles_u16(count);
        Ok(self)
    }

    // ── frame loop ────────────────────────────────────────────────────────

    /// Runs `callback` once per presented frame with the elapsed milliseconds
    /// since the previous frame (since this call, for the first frame).
    ///
    /// Calling `start` on a running loop replaces the callback and resets the
    /// time baseline.
    pub fn start<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Self, f64) + 'static,
    {
        if self.frame_loop.start(Box::new(callback)) {
            self.surface.request_frame();
        }
        log::debug!("frame loop started");
        self
    }

    /// Stops the frame loop. A frame already requested from the host arrives
    /// as a no-op.
    pub fn stop(&mut self) -> &mut Self {
        if self.frame_loop.stop() {
            log::debug!("frame loop stopped");
        }
        self
    }

    /// Host entry point for a presented frame.
    ///
    /// Runs the callback once and requests the next frame while the loop is
    /// still running. Returns whether a callback ran.
    pub fn tick(&mut self) -> bool {
        let Some(mut tick) = self.frame_loop.begin_tick() else {
            return false;
        };

        (tick.callback)(self, tick.elapsed_ms);

        if self.frame_loop.end_tick(tick) {
            self.surface.request_frame();
        }
        true
    }

    /// Host entry point for a redraw the window system asked for.
    ///
    /// Ticks while the loop is running. When it is idle and the surface
    /// contents were `invalidated` (resized, exposed), clears to the configured
    /// color instead. Returns whether the frame must be presented.
    pub fn redraw(&mut self, invalidated: bool) -> bool {
        if self.tick() {
            return true;
        }
        if invalidated {
            let clear = self.config.clear_color;
            self.background(clear);
            return true;
        }
        false
    }

    pub fn loop_state(&self) -> LoopState {
        self.frame_loop.state()
    }

    pub fn is_animating(&self) -> bool {
        self.frame_loop.is_running()
    }
}

impl<B: GlBackend, S: Surface> Drop for Renderer<B, S> {
    fn drop(&mut self) {
        self.frame_loop.stop();

        if let Some(program) = self.program.take() {
            self.backend.use_program(None);
            self.backend.delete_program(program.handle);
        }
        for unit in [self.vertex_shader.take(), self.fragment_shader.take()]
            .into_iter()
            .flatten()
        {
            self.backend.delete_shader(unit.handle);
        }
        if let Some(buffer) = self.vertex_buffer.take() {
            self.backend.delete_buffer(buffer.handle);
        }
        if let Some(buffer) = self.index_buffer.take() {
            self.backend.delete_buffer(buffer.handle);
        }
    }
}
