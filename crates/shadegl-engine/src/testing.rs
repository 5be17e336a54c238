//! In-memory driver and surface doubles for unit tests.
//!
//! `MockBackend` imitates just enough of a GL driver to exercise the renderer:
//! it "compiles" anything that has a `main` with balanced delimiters, collects
//! `attribute`/`uniform` declarations at link time, and records every
//! state-changing call.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::device::{BackingSize, BufferTarget, BufferUsage, Capability, Face, GlBackend, Surface, Winding};
use crate::locations::{AttributeLayout, UniformValue};
use crate::paint::Color;
use crate::pipeline::ShaderKind;

pub(crate) const VERTEX_SRC: &str = "\
attribute vec2 a_position;
attribute vec3 a_color;
uniform float u_time;
varying vec3 v_color;
void main() {
    v_color = a_color;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

pub(crate) const FRAGMENT_SRC: &str = "\
precision mediump float;
uniform vec2 u_resolution;
uniform float u_time;
varying vec3 v_color;
void main() {
    gl_FragColor = vec4(v_color, 1.0);
}
";

/// State-changing driver call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Enable(Capability),
    FrontFace(Winding),
    CullFace(Face),
    Viewport(u32, u32),
    Clear(Color),
    UseProgram(Option<u32>),
    AttribPointer(u32, AttributeLayout),
    EnableAttrib(u32),
    SetUniform(u32, UniformValue),
    Draw(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct Upload {
    pub target: BufferTarget,
    pub buffer: u32,
    pub bytes: Vec<u8>,
    pub usage: BufferUsage,
}

struct MockShader {
    kind: ShaderKind,
    source: String,
    compiled: bool,
}

#[derive(Default)]
struct MockProgram {
    shaders: Vec<u32>,
    linked: bool,
    log: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Default)]
pub(crate) struct MockBackend {
    next_id: Cell<u32>,
    shaders: RefCell<HashMap<u32, MockShader>>,
    programs: RefCell<HashMap<u32, MockProgram>>,
    buffers: RefCell<HashSet<u32>>,
    uploads: RefCell<Vec<Upload>>,
    calls: RefCell<Vec<Call>>,
    attrib_queries: Cell<usize>,
    uniform_queries: Cell<usize>,
    /// Shaders, programs and buffers not yet deleted. Shared so it can be
    /// read after the backend has been dropped along with its renderer.
    live: Rc<Cell<usize>>,

    fail_create_shader: Cell<bool>,
    fail_create_program: Cell<bool>,
    fail_create_buffer: Cell<bool>,
    fail_link: RefCell<Option<String>>,
    fail_validate: RefCell<Option<String>>,
}

fn balanced(source: &str) -> bool {
    let mut stack = Vec::new();
    for ch in source.chars() {
        match ch {
            '(' | '{' => stack.push(ch),
            ')' if stack.pop() != Some('(') => return false,
            '}' if stack.pop() != Some('{') => return false,
            _ => {}
        }
    }
    stack.is_empty()
}

/// Names declared as `<keyword> <type> <name>;` at the start of a line.
fn declarations(source: &str, keyword: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            (tokens.next()? == keyword).then_some(())?;
            let _ty = tokens.next()?;
            Some(tokens.next()?.trim_end_matches(';').to_owned())
        })
        .collect()
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Self::default()
        }
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn created(&self) {
        self.live.set(self.live.get() + 1);
    }

    fn deleted(&self, removed: bool) {
        if removed {
            self.live.set(self.live.get() - 1);
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    // ── failure injection ─────────────────────────────────────────────────

    pub fn fail_create_shader(&self, fail: bool) {
        self.fail_create_shader.set(fail);
    }

    pub fn fail_create_program(&self, fail: bool) {
        self.fail_create_program.set(fail);
    }

    pub fn fail_create_buffer(&self, fail: bool) {
        self.fail_create_buffer.set(fail);
    }

    pub fn fail_link(&self, log: Option<&str>) {
        *self.fail_link.borrow_mut() = log.map(str::to_owned);
    }

    pub fn fail_validate(&self, log: Option<&str>) {
        *self.fail_validate.borrow_mut() = log.map(str::to_owned);
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn attrib_queries(&self) -> usize {
        self.attrib_queries.get()
    }

    pub fn uniform_queries(&self) -> usize {
        self.uniform_queries.get()
    }

    pub fn last_upload(&self) -> Option<Upload> {
        self.uploads.borrow().last().cloned()
    }

    pub fn is_live_shader(&self, shader: u32) -> bool {
        self.shaders.borrow().contains_key(&shader)
    }

    pub fn live_shader_count(&self) -> usize {
        self.shaders.borrow().len()
    }

    pub fn is_live_program(&self, program: u32) -> bool {
        self.programs.borrow().contains_key(&program)
    }

    pub fn live_program_count(&self) -> usize {
        self.programs.borrow().len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.buffers.borrow().len()
    }

    pub fn live_objects(&self) -> Rc<Cell<usize>> {
        self.live.clone()
    }

    pub fn attached(&self, program: u32) -> Vec<u32> {
        self.programs
            .borrow()
            .get(&program)
            .map(|p| p.shaders.clone())
            .unwrap_or_default()
    }

    /// Last program passed to `use_program`.
    pub fn active_program(&self) -> Option<u32> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            Call::UseProgram(p) => Some(*p),
            _ => None,
        })?
    }
}

impl GlBackend for MockBackend {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = u32;

    fn enable(&self, cap: Capability) {
        self.record(Call::Enable(cap));
    }

    fn front_face(&self, winding: Winding) {
        self.record(Call::FrontFace(winding));
    }

    fn cull_face(&self, face: Face) {
        self.record(Call::CullFace(face));
    }

    fn viewport(&self, width: u32, height: u32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear(&self, color: Color) {
        self.record(Call::Clear(color));
    }

    fn create_shader(&self, kind: ShaderKind) -> Result<u32, String> {
        if self.fail_create_shader.get() {
            return Err("out of shader objects".into());
        }
        let id = self.id();
        self.created();
        self.shaders.borrow_mut().insert(
            id,
            MockShader {
                kind,
                source: String::new(),
                compiled: false,
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
            s.source = source.to_owned();
        }
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
            s.compiled = s.source.contains("void main") && balanced(&s.source);
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.borrow().get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        match self.shaders.borrow().get(&shader) {
            Some(s) if !s.compiled => "ERROR: 0:1: syntax error".into(),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: u32) {
        let removed = self.shaders.borrow_mut().remove(&shader).is_some();
        self.deleted(removed);
    }

    fn create_program(&self) -> Result<u32, String> {
        if self.fail_create_program.get() {
            return Err("out of program objects".into());
        }
        let id = self.id();
        self.created();
        self.programs.borrow_mut().insert(id, MockProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
            p.shaders.push(shader);
        }
    }

    fn link_program(&self, program: u32) {
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let Some(p) = programs.get_mut(&program) else { return };

        if let Some(log) = self.fail_link.borrow().clone() {
            p.linked = false;
            p.log = log;
            return;
        }

        let stage = |kind: ShaderKind| {
            p.shaders
                .iter()
                .filter_map(|id| shaders.get(id))
                .find(|s| s.kind == kind && s.compiled)
        };

        match (stage(ShaderKind::Vertex), stage(ShaderKind::Fragment)) {
            (Some(vs), Some(fs)) => {
                let mut uniforms = declarations(&vs.source, "uniform");
                for name in declarations(&fs.source, "uniform") {
                    if !uniforms.contains(&name) {
                        uniforms.push(name);
                    }
                }
                p.attributes = declarations(&vs.source, "attribute");
                p.uniforms = uniforms;
                p.linked = true;
            }
            _ => {
                p.linked = false;
                p.log = "missing compiled vertex or fragment stage".into();
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.programs.borrow().get(&program).is_some_and(|p| p.linked)
    }

    fn validate_program(&self, program: u32) -> bool {
        if let Some(log) = self.fail_validate.borrow().clone() {
            if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
                p.log = log;
            }
            return false;
        }
        self.program_link_status(program)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.programs
            .borrow()
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        let removed = self.programs.borrow_mut().remove(&program).is_some();
        self.deleted(removed);
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_create_buffer.get() {
            return Err("out of buffer objects".into());
        }
        let id = self.id();
        self.created();
        self.buffers.borrow_mut().insert(id);
        Ok(id)
    }

    fn upload_buffer(&self, target: BufferTarget, buffer: u32, bytes: &[u8], usage: BufferUsage) {
        self.uploads.borrow_mut().push(Upload {
            target,
            buffer,
            bytes: bytes.to_vec(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        let removed = self.buffers.borrow_mut().remove(&buffer);
        self.deleted(removed);
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.attrib_queries.set(self.attrib_queries.get() + 1);
        let programs = self.programs.borrow();
        let index = programs.get(&program)?.attributes.iter().position(|a| a == name)?;
        Some(index as u32)
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        self.uniform_queries.set(self.uniform_queries.get() + 1);
        let programs = self.programs.borrow();
        let index = programs.get(&program)?.uniforms.iter().position(|u| u == name)?;
        // Distinct per program, like real driver handles.
        Some(program * 100 + index as u32)
    }

    fn vertex_attrib_pointer(&self, slot: u32, layout: &AttributeLayout) {
        self.record(Call::AttribPointer(slot, *layout));
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        self.record(Call::EnableAttrib(slot));
    }

    fn set_uniform(&self, location: &u32, value: &UniformValue) {
        self.record(Call::SetUniform(*location, value.clone()));
    }

    fn draw_triangles_u16(&self, count: usize) {
        self.record(Call::Draw(count));
    }
}

/// Surface double with a settable client size.
pub(crate) struct MockSurface {
    client: (f64, f64),
    ratio: f64,
    backing: BackingSize,
    frame_requests: Cell<usize>,
}

impl MockSurface {
    pub fn new(width: f64, height: f64, ratio: f64) -> Self {
        Self {
            client: (width, height),
            ratio,
            backing: BackingSize::default(),
            frame_requests: Cell::new(0),
        }
    }

    pub fn set_client_size(&mut self, width: f64, height: f64) {
        self.client = (width, height);
    }

    pub fn set_ratio(&mut self, ratio: f64) {
        self.ratio = ratio;
    }

    pub fn frame_requests(&self) -> usize {
        self.frame_requests.get()
    }
}

impl Surface for MockSurface {
    fn client_size(&self) -> (f64, f64) {
        self.client
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.ratio
    }

    fn backing_size(&self) -> BackingSize {
        self.backing
    }

    fn set_backing_size(&mut self, size: BackingSize) {
        self.backing = size;
    }

    fn request_frame(&self) {
        self.frame_requests.set(self.frame_requests.get() + 1);
    }
}
