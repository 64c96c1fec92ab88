use serde::{Deserialize, Serialize};

/// Shape of a parameter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterClass {
    Scalar,
    Vector,
    Matrix,
    Object,
    Struct,
}

/// Element type of a leaf parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    Void,
    Bool,
    Int32,
    Single,
    String,
    Texture,
    Texture1D,
    Texture2D,
    Texture3D,
    TextureCube,
}

impl ParameterType {
    pub fn is_texture(self) -> bool {
        matches!(
            self,
            ParameterType::Texture
                | ParameterType::Texture1D
                | ParameterType::Texture2D
                | ParameterType::Texture3D
                | ParameterType::TextureCube
        )
    }

    /// View dimension a texture bound to this parameter is expected to have.
    pub fn texture_dimension(self) -> Option<wgpu::TextureViewDimension> {
        match self {
            ParameterType::Texture1D => Some(wgpu::TextureViewDimension::D1),
            ParameterType::Texture | ParameterType::Texture2D => {
                Some(wgpu::TextureViewDimension::D2)
            }
            ParameterType::Texture3D => Some(wgpu::TextureViewDimension::D3),
            ParameterType::TextureCube => Some(wgpu::TextureViewDimension::Cube),
            _ => None,
        }
    }
}
