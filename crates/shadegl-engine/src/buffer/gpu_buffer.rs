use bytemuck::Pod;

use crate::device::{BufferTarget, BufferUsage, GlBackend};
use crate::error::{GlError, Resource, Result};

use super::nested::Nested;

/// Element type a buffer role uploads.
pub trait BufferElement: Pod + Copy + PartialEq + std::fmt::Debug {
    fn from_f64(v: f64) -> Result<Self>;
}

impl BufferElement for f32 {
    #[inline]
    fn from_f64(v: f64) -> Result<Self> {
        Ok(v as f32)
    }
}

impl BufferElement for u16 {
    /// Indices are unsigned 16-bit: at most 65536 addressable vertices.
    fn from_f64(v: f64) -> Result<Self> {
        if v.fract() == 0.0 && (0.0..=u16::MAX as f64).contains(&v) {
            Ok(v as u16)
        } else {
            Err(GlError::IndexOutOfRange { value: v })
        }
    }
}

/// A driver buffer plus the data it was filled from.
#[derive(Debug, Clone)]
pub struct GpuBuffer<H, T> {
    pub handle: H,
    /// Caller-supplied data with its original grouping.
    pub data: Nested,
    /// The exact sequence uploaded to the driver.
    pub flat: Vec<T>,
}

impl<H, T> GpuBuffer<H, T> {
    /// Number of uploaded elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

pub type VertexBuffer<H> = GpuBuffer<H, f32>;
pub type IndexBuffer<H> = GpuBuffer<H, u16>;

/// Converts, allocates and uploads `data` to `target` with a static usage hint.
///
/// Conversion runs first so a rejected value never allocates a driver buffer.
pub(crate) fn upload<B: GlBackend, T: BufferElement>(
    backend: &B,
    target: BufferTarget,
    data: Nested,
) -> Result<GpuBuffer<B::Buffer, T>> {
    let flat = data
        .flatten()
        .into_iter()
        .map(T::from_f64)
        .collect::<Result<Vec<T>>>()?;

    let resource = match target {
        BufferTarget::Array => Resource::VertexBuffer,
        BufferTarget::ElementArray => Resource::IndexBuffer,
    };

    let handle = backend
        .create_buffer()
        .map_err(|reason| GlError::ResourceCreation { resource, reason })?;

    backend.upload_buffer(target, handle, bytemuck::cast_slice(&flat), BufferUsage::StaticDraw);
    log::debug!("uploaded {resource}: {} elements", flat.len());

    Ok(GpuBuffer { handle, data, flat })
}
