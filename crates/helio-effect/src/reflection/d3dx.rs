//! Compiled effect (D3DX) parameter records

use super::{child_descriptors, effect_class, ReflectionSource};
use crate::annotation::Annotation;
use crate::descriptor::{ParameterDescriptor, TypeCode};
use crate::types::ParameterType;
use crate::Result;

/// D3DX parameter class codes.
pub mod class {
    pub const SCALAR: u32 = 0;
    pub const VECTOR: u32 = 1;
    pub const MATRIX_ROWS: u32 = 2;
    pub const MATRIX_COLUMNS: u32 = 3;
    pub const OBJECT: u32 = 4;
    pub const STRUCT: u32 = 5;
}

/// D3DX parameter type codes. Codes from `SAMPLER` on have no counterpart in
/// the unified model and are kept raw.
pub mod ty {
    pub const VOID: u32 = 0;
    pub const BOOL: u32 = 1;
    pub const INT: u32 = 2;
    pub const FLOAT: u32 = 3;
    pub const STRING: u32 = 4;
    pub const TEXTURE: u32 = 5;
    pub const TEXTURE1D: u32 = 6;
    pub const TEXTURE2D: u32 = 7;
    pub const TEXTURE3D: u32 = 8;
    pub const TEXTURECUBE: u32 = 9;
    pub const SAMPLER: u32 = 10;
    pub const SAMPLER1D: u32 = 11;
    pub const SAMPLER2D: u32 = 12;
    pub const SAMPLER3D: u32 = 13;
    pub const SAMPLERCUBE: u32 = 14;
    pub const PIXELSHADER: u32 = 15;
    pub const VERTEXSHADER: u32 = 16;
    pub const PIXELFRAGMENT: u32 = 17;
    pub const VERTEXFRAGMENT: u32 = 18;
    pub const UNSUPPORTED: u32 = 19;
}

pub(crate) fn parameter_type(code: u32) -> Option<ParameterType> {
    match code {
        ty::VOID => Some(ParameterType::Void),
        ty::BOOL => Some(ParameterType::Bool),
        ty::INT => Some(ParameterType::Int32),
        ty::FLOAT => Some(ParameterType::Single),
        ty::STRING => Some(ParameterType::String),
        ty::TEXTURE => Some(ParameterType::Texture),
        ty::TEXTURE1D => Some(ParameterType::Texture1D),
        ty::TEXTURE2D => Some(ParameterType::Texture2D),
        ty::TEXTURE3D => Some(ParameterType::Texture3D),
        ty::TEXTURECUBE => Some(ParameterType::TextureCube),
        _ => None,
    }
}

/// One parameter as read from a compiled effect.
#[derive(Debug, Clone, Default)]
pub struct D3dxParameter {
    pub name: String,
    pub semantic: String,
    pub class: u32,
    pub ty: u32,
    pub rows: u32,
    pub columns: u32,
    /// Annotations are counted but not decoded by the effect reader.
    pub annotation_count: u32,
    pub element_count: u32,
    pub member_count: u32,
    pub member_handles: Vec<D3dxParameter>,
    pub data: Vec<u8>,
}

impl ReflectionSource for D3dxParameter {
    fn descriptor(&self) -> Result<ParameterDescriptor> {
        let class = effect_class(self.class)?;
        let type_code = match parameter_type(self.ty) {
            Some(ty) => TypeCode::Resolved(class, ty),
            None => TypeCode::Raw {
                class,
                native_type_code: self.ty,
            },
        };

        let (elements, members) = child_descriptors(
            &self.name,
            self.element_count,
            self.member_count,
            &self.member_handles,
        )?;

        Ok(ParameterDescriptor::new(self.name.clone(), type_code)
            .with_semantic(self.semantic.clone())
            .with_dimensions(self.rows, self.columns)
            .with_annotations(vec![Annotation::default(); self.annotation_count as usize])
            .with_elements(elements)
            .with_members(members)
            .with_data(self.data.clone()))
    }
}
