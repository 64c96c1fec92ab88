//! GLSL effect parameter records
//!
//! Same class codes as compiled effects. Sampler types fold into the
//! matching texture types instead of staying raw.

use super::{child_descriptors, effect_class, ReflectionSource};
use crate::annotation::{Annotation, AnnotationValue};
use crate::descriptor::{ParameterDescriptor, TypeCode};
use crate::types::ParameterType;
use crate::Result;

pub mod ty {
    pub const VOID: u32 = 0;
    pub const BOOL: u32 = 1;
    pub const INT32: u32 = 2;
    pub const SINGLE: u32 = 3;
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
}

pub(crate) fn parameter_type(code: u32) -> Option<ParameterType> {
    match code {
        ty::VOID => Some(ParameterType::Void),
        ty::BOOL => Some(ParameterType::Bool),
        ty::INT32 => Some(ParameterType::Int32),
        ty::SINGLE => Some(ParameterType::Single),
        ty::STRING => Some(ParameterType::String),
        ty::TEXTURE | ty::SAMPLER => Some(ParameterType::Texture),
        ty::TEXTURE1D | ty::SAMPLER1D => Some(ParameterType::Texture1D),
        ty::TEXTURE2D | ty::SAMPLER2D => Some(ParameterType::Texture2D),
        ty::TEXTURE3D | ty::SAMPLER3D => Some(ParameterType::Texture3D),
        ty::TEXTURECUBE | ty::SAMPLERCUBE => Some(ParameterType::TextureCube),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct GlslAnnotation {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct GlslParameter {
    pub name: String,
    pub semantic: String,
    pub class: u32,
    pub ty: u32,
    pub rows: u32,
    pub columns: u32,
    pub annotation_handles: Vec<GlslAnnotation>,
    pub element_count: u32,
    pub member_count: u32,
    pub member_handles: Vec<GlslParameter>,
    pub data: Vec<u8>,
}

impl ReflectionSource for GlslParameter {
    fn descriptor(&self) -> Result<ParameterDescriptor> {
        let class = effect_class(self.class)?;
        let type_code = match parameter_type(self.ty) {
            Some(ty) => TypeCode::Resolved(class, ty),
            None => TypeCode::Raw {
                class,
                native_type_code: self.ty,
            },
        };

        let annotations = self
            .annotation_handles
            .iter()
            .map(|handle| {
                let annotation = Annotation::new(handle.name.clone());
                if handle.data.is_empty() {
                    annotation
                } else {
                    annotation.with_value(AnnotationValue::Bytes(handle.data.clone()))
                }
            })
            .collect();

        let (elements, members) = child_descriptors(
            &self.name,
            self.element_count,
            self.member_count,
            &self.member_handles,
        )?;

        Ok(ParameterDescriptor::new(self.name.clone(), type_code)
            .with_semantic(self.semantic.clone())
            .with_dimensions(self.rows, self.columns)
            .with_annotations(annotations)
            .with_elements(elements)
            .with_members(members)
            .with_data(self.data.clone()))
    }
}
