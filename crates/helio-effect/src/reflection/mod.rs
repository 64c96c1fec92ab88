//! Reflection backends
//!
//! Each backend converts its native parameter records into a
//! [`ParameterDescriptor`] tree; decoding happens once, in [`crate::build`].
//!
//! - [`d3dx`]: compiled effect binaries (D3DX parameter records)
//! - [`glsl`]: GLSL effect objects, which reuse the effect class/type split
//!   and add sampler types
//! - [`uniform`]: live GL active-uniform introspection

pub mod d3dx;
pub mod glsl;
pub mod uniform;

pub use d3dx::D3dxParameter;
pub use glsl::{GlslAnnotation, GlslParameter};
pub use uniform::ActiveUniform;

use crate::config::BuildConfig;
use crate::descriptor::ParameterDescriptor;
use crate::parameter::Parameter;
use crate::types::ParameterClass;
use crate::{Error, Result};

/// A native reflection record that can describe a parameter tree.
pub trait ReflectionSource {
    fn descriptor(&self) -> Result<ParameterDescriptor>;

    fn build_parameter(&self) -> Result<Parameter> {
        crate::build(&self.descriptor()?)
    }

    fn build_parameter_with(&self, config: &BuildConfig) -> Result<Parameter> {
        crate::build_with(&self.descriptor()?, config)
    }
}

/// Parameter class codes shared by compiled and GLSL effect records.
pub(crate) fn effect_class(code: u32) -> Result<ParameterClass> {
    use d3dx::class;
    match code {
        class::SCALAR => Ok(ParameterClass::Scalar),
        class::VECTOR => Ok(ParameterClass::Vector),
        class::MATRIX_ROWS | class::MATRIX_COLUMNS => Ok(ParameterClass::Matrix),
        class::OBJECT => Ok(ParameterClass::Object),
        class::STRUCT => Ok(ParameterClass::Struct),
        _ => Err(Error::UnsupportedParameterKind(format!(
            "effect parameter class {}",
            code
        ))),
    }
}

/// Split `handles` into array elements or struct members per the record's
/// declared counts. Elements win when both are set.
pub(crate) fn child_descriptors<T: ReflectionSource>(
    name: &str,
    element_count: u32,
    member_count: u32,
    handles: &[T],
) -> Result<(Vec<ParameterDescriptor>, Vec<ParameterDescriptor>)> {
    let (count, is_array) = if element_count > 0 {
        (element_count as usize, true)
    } else {
        (member_count as usize, false)
    };

    if handles.len() < count {
        return Err(Error::Decode(format!(
            "parameter '{}' declares {} children but carries {} handles",
            name,
            count,
            handles.len()
        )));
    }

    let children = handles[..count]
        .iter()
        .map(|handle| handle.descriptor())
        .collect::<Result<Vec<_>>>()?;

    Ok(if is_array {
        (children, Vec::new())
    } else {
        (Vec::new(), children)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_effect_classes() {
        assert_eq!(effect_class(2).unwrap(), ParameterClass::Matrix);
        assert_eq!(effect_class(3).unwrap(), ParameterClass::Matrix);
        assert_eq!(effect_class(5).unwrap(), ParameterClass::Struct);
        assert!(matches!(
            effect_class(6),
            Err(Error::UnsupportedParameterKind(_))
        ));
    }
}
