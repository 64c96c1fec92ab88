//! Live GL active-uniform introspection

use super::ReflectionSource;
use crate::classify::UniformType;
use crate::descriptor::{ParameterDescriptor, TypeCode};
use crate::{Error, Result};

/// One active uniform as reported by the GL program.
#[derive(Debug, Clone, Default)]
pub struct ActiveUniform {
    /// GL reports arrays as `name[0]`; the suffix is dropped.
    pub name: String,
    pub uniform_type: u32,
    pub array_size: u32,
    /// Current contents, if read back. Without data every leaf starts at
    /// the type's default.
    pub data: Option<Vec<u8>>,
}

impl ActiveUniform {
    pub fn new(name: impl Into<String>, uniform_type: UniformType) -> Self {
        Self {
            name: name.into(),
            uniform_type: uniform_type.code(),
            array_size: 1,
            data: None,
        }
    }

    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = Some(data.into());
        self
    }

    fn base_name(&self) -> &str {
        self.name.strip_suffix("[0]").unwrap_or(&self.name)
    }
}

impl ReflectionSource for ActiveUniform {
    fn descriptor(&self) -> Result<ParameterDescriptor> {
        let uniform = UniformType::from_code(self.uniform_type).ok_or_else(|| {
            Error::UnsupportedParameterKind(format!(
                "GL uniform type {:#06x} on '{}'",
                self.uniform_type, self.name
            ))
        })?;
        let (rows, columns) = uniform.dimensions();
        let type_code = TypeCode::Uniform(self.uniform_type);
        let name = self.base_name();

        if self.array_size <= 1 {
            return Ok(ParameterDescriptor::new(name, type_code)
                .with_dimensions(rows, columns)
                .with_data(self.data.clone().unwrap_or_default()));
        }

        let stride = uniform.byte_size();
        let mut elements = Vec::with_capacity(self.array_size as usize);
        for i in 0..self.array_size as usize {
            let data = match &self.data {
                Some(data) if stride > 0 => data
                    .get(i * stride..(i + 1) * stride)
                    .map(<[u8]>::to_vec)
                    .ok_or_else(|| {
                        Error::Decode(format!(
                            "uniform '{}' holds {} bytes, element {} needs {}",
                            name,
                            data.len(),
                            i,
                            (i + 1) * stride
                        ))
                    })?,
                _ => Vec::new(),
            };
            elements.push(
                ParameterDescriptor::new(format!("{}[{}]", name, i), type_code)
                    .with_dimensions(rows, columns)
                    .with_data(data),
            );
        }

        Ok(ParameterDescriptor::new(name, type_code)
            .with_dimensions(rows, columns)
            .with_elements(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParameterClass, ParameterType};
    use crate::value::ParameterValue;

    #[test]
    fn introspected_uniforms_start_at_defaults() {
        let p = ActiveUniform::new("u_enabled", UniformType::BoolVec3)
            .build_parameter()
            .unwrap();
        assert_eq!(p.class(), ParameterClass::Vector);
        assert_eq!(p.parameter_type(), ParameterType::Bool);
        assert_eq!((p.row_count(), p.column_count()), (1, 3));
        assert_eq!(p.value(), &ParameterValue::Bools(vec![false; 3]));

        let p = ActiveUniform::new("u_normal", UniformType::FloatMat3)
            .build_parameter()
            .unwrap();
        assert_eq!((p.row_count(), p.column_count()), (3, 3));
        assert_eq!(p.value(), &ParameterValue::Singles(vec![0.0; 9]));
    }

    #[test]
    fn uniform_data_is_decoded() {
        let p = ActiveUniform::new("u_time", UniformType::Float)
            .with_data(2.5f32.to_le_bytes())
            .build_parameter()
            .unwrap();
        assert_eq!(p.get_value_single().unwrap(), 2.5);
    }

    #[test]
    fn arrays_split_into_named_elements() {
        let data: Vec<u8> = [1.0f32, 2.0, 3.0, 4.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let p = ActiveUniform::new("u_offsets[0]", UniformType::FloatVec2)
            .with_array_size(2)
            .with_data(data)
            .build_parameter()
            .unwrap();

        assert_eq!(p.name(), "u_offsets");
        assert_eq!(p.elements().len(), 2);
        assert_eq!(p.elements()[1].name(), "u_offsets[1]");
        assert_eq!(
            p.elements()[1].get_value_vector2().unwrap(),
            glam::Vec2::new(3.0, 4.0)
        );
        assert_eq!(p.get_value_single_array().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn short_array_data_is_rejected() {
        let uniform = ActiveUniform::new("u_weights[0]", UniformType::Float)
            .with_array_size(3)
            .with_data(vec![0; 8]);
        assert!(matches!(uniform.descriptor(), Err(Error::Decode(_))));
    }

    #[test]
    fn unsupported_uniform_types_fail() {
        let uniform = ActiveUniform {
            name: "u_volume".into(),
            uniform_type: 0x8B5F,
            array_size: 1,
            data: None,
        };
        assert!(matches!(
            uniform.build_parameter(),
            Err(Error::UnsupportedParameterKind(_))
        ));
    }
}
