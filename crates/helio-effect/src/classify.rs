//! Mapping of GL active-uniform types onto the unified parameter model

use crate::types::{ParameterClass, ParameterType};
use crate::value::ParameterValue;
use crate::{Error, Result};

/// GL active-uniform types the parameter model understands, keyed by their
/// GL enumerant values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum UniformType {
    Float = 0x1406,
    FloatVec2 = 0x8B50,
    FloatVec3 = 0x8B51,
    FloatVec4 = 0x8B52,
    Int = 0x1404,
    IntVec2 = 0x8B53,
    IntVec3 = 0x8B54,
    IntVec4 = 0x8B55,
    Bool = 0x8B56,
    BoolVec2 = 0x8B57,
    BoolVec3 = 0x8B58,
    BoolVec4 = 0x8B59,
    FloatMat2 = 0x8B5A,
    FloatMat3 = 0x8B5B,
    FloatMat4 = 0x8B5C,
    Sampler2D = 0x8B5E,
    SamplerCube = 0x8B60,
}

impl UniformType {
    pub const ALL: [UniformType; 17] = [
        UniformType::Float,
        UniformType::FloatVec2,
        UniformType::FloatVec3,
        UniformType::FloatVec4,
        UniformType::Int,
        UniformType::IntVec2,
        UniformType::IntVec3,
        UniformType::IntVec4,
        UniformType::Bool,
        UniformType::BoolVec2,
        UniformType::BoolVec3,
        UniformType::BoolVec4,
        UniformType::FloatMat2,
        UniformType::FloatMat3,
        UniformType::FloatMat4,
        UniformType::Sampler2D,
        UniformType::SamplerCube,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.code() == code)
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn parameter_class(self) -> ParameterClass {
        use UniformType::*;
        match self {
            Float | Int | Bool => ParameterClass::Scalar,
            FloatVec2 | FloatVec3 | FloatVec4 | IntVec2 | IntVec3 | IntVec4 | BoolVec2
            | BoolVec3 | BoolVec4 => ParameterClass::Vector,
            FloatMat2 | FloatMat3 | FloatMat4 => ParameterClass::Matrix,
            Sampler2D | SamplerCube => ParameterClass::Object,
        }
    }

    pub fn parameter_type(self) -> ParameterType {
        use UniformType::*;
        match self {
            Float | FloatVec2 | FloatVec3 | FloatVec4 | FloatMat2 | FloatMat3 | FloatMat4 => {
                ParameterType::Single
            }
            Int | IntVec2 | IntVec3 | IntVec4 => ParameterType::Int32,
            Bool | BoolVec2 | BoolVec3 | BoolVec4 => ParameterType::Bool,
            Sampler2D => ParameterType::Texture2D,
            SamplerCube => ParameterType::TextureCube,
        }
    }

    /// `(rows, columns)` as a compiled effect would report the same shape.
    pub fn dimensions(self) -> (u32, u32) {
        use UniformType::*;
        match self {
            Float | Int | Bool => (1, 1),
            FloatVec2 | IntVec2 | BoolVec2 => (1, 2),
            FloatVec3 | IntVec3 | BoolVec3 => (1, 3),
            FloatVec4 | IntVec4 | BoolVec4 => (1, 4),
            FloatMat2 => (2, 2),
            FloatMat3 => (3, 3),
            FloatMat4 => (4, 4),
            Sampler2D | SamplerCube => (0, 0),
        }
    }

    /// Bytes one value of this type occupies in a uniform data buffer.
    pub fn byte_size(self) -> usize {
        let (rows, columns) = self.dimensions();
        (rows * columns) as usize * 4
    }

    /// Value a freshly introspected uniform holds before anything is written.
    pub fn default_value(self) -> ParameterValue {
        let (rows, columns) = self.dimensions();
        let len = (rows * columns) as usize;
        match (self.parameter_class(), self.parameter_type()) {
            (ParameterClass::Scalar, ParameterType::Single) => ParameterValue::Single(0.0),
            (ParameterClass::Scalar, ParameterType::Int32) => ParameterValue::Int32(0),
            (ParameterClass::Scalar, ParameterType::Bool) => ParameterValue::Bool(false),
            (ParameterClass::Vector | ParameterClass::Matrix, ParameterType::Single) => {
                ParameterValue::Singles(vec![0.0; len])
            }
            (ParameterClass::Vector, ParameterType::Int32) => ParameterValue::Int32s(vec![0; len]),
            (ParameterClass::Vector, ParameterType::Bool) => {
                ParameterValue::Bools(vec![false; len])
            }
            _ => ParameterValue::None,
        }
    }
}

/// Classify a GL active-uniform type code.
pub fn classify(raw_type_code: u32) -> Result<(ParameterClass, ParameterType)> {
    let ty = UniformType::from_code(raw_type_code).ok_or_else(|| {
        Error::UnsupportedParameterKind(format!("GL uniform type {:#06x}", raw_type_code))
    })?;
    Ok((ty.parameter_class(), ty.parameter_type()))
}
