/// Scalar type of one attribute component as stored in the vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Float,
}

impl ComponentType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size(self) -> u32 {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::Float => 4,
        }
    }
}

/// How one attribute is read out of the bound vertex buffer.
///
/// `stride` is the byte distance between consecutive vertices (0 = tightly
/// packed); `offset` is this attribute's byte offset within a vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeLayout {
    /// Components per vertex, 1 to 4.
    pub components: u8,
    pub component_type: ComponentType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
}

impl AttributeLayout {
    /// Tightly packed, unnormalized f32 components.
    #[inline]
    pub const fn floats(components: u8) -> Self {
        Self {
            components,
            component_type: ComponentType::Float,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }

    #[inline]
    pub const fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    #[inline]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub const fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }

    /// Bytes occupied by this attribute inside one vertex.
    #[inline]
    pub const fn byte_size(&self) -> u32 {
        self.components as u32 * self.component_type.size()
    }
}

/// Value uploaded to a uniform of the active program.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
    /// Column-major 4x4 matrix.
    Mat4([f32; 16]),
}
