//! Leaf value storage

/// Non-owning reference to a texture bound to a parameter.
///
/// The texture itself lives in whatever manager created it; the parameter
/// only records which one and how it is viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureRef {
    pub id: u32,
    pub dimension: wgpu::TextureViewDimension,
}

impl TextureRef {
    pub fn new(id: u32, dimension: wgpu::TextureViewDimension) -> Self {
        Self { id, dimension }
    }

    pub fn texture_2d(id: u32) -> Self {
        Self::new(id, wgpu::TextureViewDimension::D2)
    }

    pub fn cube(id: u32) -> Self {
        Self::new(id, wgpu::TextureViewDimension::Cube)
    }
}

/// The payload of a leaf parameter.
///
/// Vector and matrix storage is a row-major `Singles` sequence of
/// `rows * columns` floats. Arrays and structs always hold `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParameterValue {
    #[default]
    None,
    Bool(bool),
    Int32(i32),
    Single(f32),
    Singles(Vec<f32>),
    Int32s(Vec<i32>),
    Bools(Vec<bool>),
    Texture(TextureRef),
    /// Bytes of a native type the unified model does not interpret.
    Raw {
        native_type_code: u32,
        bytes: Vec<u8>,
    },
}

impl ParameterValue {
    /// Short tag name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::None => "no value",
            ParameterValue::Bool(_) => "bool",
            ParameterValue::Int32(_) => "int32",
            ParameterValue::Single(_) => "single",
            ParameterValue::Singles(_) => "float sequence",
            ParameterValue::Int32s(_) => "int32 sequence",
            ParameterValue::Bools(_) => "bool sequence",
            ParameterValue::Texture(_) => "texture",
            ParameterValue::Raw { .. } => "raw native value",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ParameterValue::None)
    }
}
