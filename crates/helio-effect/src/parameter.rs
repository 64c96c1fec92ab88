//! Effect parameters: typed, possibly nested shader inputs
//!
//! A [`Parameter`] is either a leaf holding a [`ParameterValue`], an array
//! whose children live in [`Parameter::elements`], or a struct whose children
//! live in [`Parameter::struct_members`]. Descriptive fields are fixed at
//! build time; only the value changes afterwards, through the `set_value_*`
//! family.
//!
//! Accessors and mutators assume the caller knows the declared shape. Shape
//! mismatches are reported as errors instead of coerced into defaults.

use std::fmt;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::annotation::Annotation;
use crate::collection::ParameterCollection;
use crate::types::{ParameterClass, ParameterType};
use crate::value::{ParameterValue, TextureRef};
use crate::{Error, Result};

/// One named, typed shader input.
///
/// `Clone` deep-copies elements and struct members and copies the leaf value;
/// name, semantic and annotations are shared between the copies.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub(crate) class: ParameterClass,
    pub(crate) ty: ParameterType,
    pub(crate) name: Arc<str>,
    pub(crate) semantic: Arc<str>,
    pub(crate) row_count: u32,
    pub(crate) column_count: u32,
    pub(crate) annotations: Arc<[Annotation]>,
    pub(crate) elements: ParameterCollection,
    pub(crate) struct_members: ParameterCollection,
    pub(crate) value: ParameterValue,
}

impl Parameter {
    pub fn class(&self) -> ParameterClass {
        self.class
    }

    pub fn parameter_type(&self) -> ParameterType {
        self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Engine-supplied value tag, empty when the shader declares none.
    pub fn semantic(&self) -> &str {
        &self.semantic
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn elements(&self) -> &ParameterCollection {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut ParameterCollection {
        &mut self.elements
    }

    pub fn struct_members(&self) -> &ParameterCollection {
        &self.struct_members
    }

    pub fn struct_members_mut(&mut self) -> &mut ParameterCollection {
        &mut self.struct_members
    }

    /// The stored leaf value. Always `None` for arrays and structs.
    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub fn is_array(&self) -> bool {
        !self.elements.is_empty()
    }

    pub fn is_struct(&self) -> bool {
        !self.struct_members.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_array() && !self.is_struct()
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::ValueMismatch {
            name: self.name.to_string(),
            expected,
            found: self.value.kind(),
        }
    }

    fn not_supported(&self, op: &'static str) -> Error {
        Error::NotSupported {
            op,
            class: self.class,
            name: self.name.to_string(),
        }
    }

    fn check_element_count(&self, count: usize) -> Result<()> {
        let len = self.elements.len();
        if count > len {
            return Err(Error::IndexOutOfBounds {
                name: self.name.to_string(),
                index: len,
                len,
            });
        }
        Ok(())
    }

    fn leading_singles<const N: usize>(&self, expected: &'static str) -> Result<[f32; N]> {
        match &self.value {
            ParameterValue::Singles(values) if values.len() >= N => {
                let mut out = [0.0; N];
                out.copy_from_slice(&values[..N]);
                Ok(out)
            }
            _ => Err(self.mismatch(expected)),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn get_value_boolean(&self) -> Result<bool> {
        Err(Error::Unimplemented("get_value_boolean"))
    }

    pub fn get_value_boolean_array(&self) -> Result<Vec<bool>> {
        Err(Error::Unimplemented("get_value_boolean_array"))
    }

    pub fn get_value_int32(&self) -> Result<i32> {
        match self.value {
            ParameterValue::Int32(value) => Ok(value),
            _ => Err(self.mismatch("int32")),
        }
    }

    pub fn get_value_int32_array(&self) -> Result<Vec<i32>> {
        Err(Error::Unimplemented("get_value_int32_array"))
    }

    pub fn get_value_matrix(&self) -> Result<Mat4> {
        Err(Error::Unimplemented("get_value_matrix"))
    }

    pub fn get_value_matrix_array(&self, _count: usize) -> Result<Vec<Mat4>> {
        Err(Error::Unimplemented("get_value_matrix_array"))
    }

    pub fn get_value_quaternion(&self) -> Result<Quat> {
        Err(Error::Unimplemented("get_value_quaternion"))
    }

    pub fn get_value_quaternion_array(&self) -> Result<Vec<Quat>> {
        Err(Error::Unimplemented("get_value_quaternion_array"))
    }

    /// Scalar value as `f32`. Int32 parameters are widened.
    pub fn get_value_single(&self) -> Result<f32> {
        match (self.ty, &self.value) {
            (ParameterType::Int32, ParameterValue::Int32(value)) => Ok(*value as f32),
            (_, ParameterValue::Single(value)) => Ok(*value),
            _ => Err(self.mismatch("single")),
        }
    }

    /// All floats held by this parameter.
    ///
    /// Scalars yield one value, vectors and matrices yield their row-major
    /// storage. Arrays concatenate whatever each element currently holds, so
    /// an element narrowed by `set_value_vector2` contributes two floats
    /// rather than a padded `rows * columns` stride.
    pub fn get_value_single_array(&self) -> Result<Vec<f32>> {
        if self.is_array() {
            let mut values = Vec::new();
            for element in self.elements.iter() {
                values.extend(element.get_value_single_array()?);
            }
            return Ok(values);
        }

        match self.class {
            ParameterClass::Scalar => Ok(vec![self.get_value_single()?]),
            ParameterClass::Vector | ParameterClass::Matrix => match &self.value {
                ParameterValue::Singles(values) => Ok(values.clone()),
                _ => Err(self.mismatch("float sequence")),
            },
            _ => Err(self.not_supported("get_value_single_array")),
        }
    }

    pub fn get_value_string(&self) -> Result<String> {
        Err(Error::Unimplemented("get_value_string"))
    }

    pub fn get_value_texture_2d(&self) -> Result<TextureRef> {
        match self.value {
            ParameterValue::Texture(texture)
                if texture.dimension == wgpu::TextureViewDimension::D2 =>
            {
                Ok(texture)
            }
            _ => Err(self.mismatch("2D texture")),
        }
    }

    pub fn get_value_texture_cube(&self) -> Result<TextureRef> {
        Err(Error::Unimplemented("get_value_texture_cube"))
    }

    pub fn get_value_vector2(&self) -> Result<Vec2> {
        self.leading_singles::<2>("vector2").map(Vec2::from_array)
    }

    pub fn get_value_vector2_array(&self) -> Result<Vec<Vec2>> {
        Err(Error::Unimplemented("get_value_vector2_array"))
    }

    pub fn get_value_vector3(&self) -> Result<Vec3> {
        self.leading_singles::<3>("vector3").map(Vec3::from_array)
    }

    pub fn get_value_vector3_array(&self) -> Result<Vec<Vec3>> {
        Err(Error::Unimplemented("get_value_vector3_array"))
    }

    pub fn get_value_vector4(&self) -> Result<Vec4> {
        self.leading_singles::<4>("vector4").map(Vec4::from_array)
    }

    pub fn get_value_vector4_array(&self) -> Result<Vec<Vec4>> {
        Err(Error::Unimplemented("get_value_vector4_array"))
    }

    /// Native type code and untouched bytes of a raw leaf.
    pub fn get_value_raw(&self) -> Result<(u32, &[u8])> {
        match &self.value {
            ParameterValue::Raw {
                native_type_code,
                bytes,
            } => Ok((*native_type_code, bytes.as_slice())),
            _ => Err(self.mismatch("raw native value")),
        }
    }

    // ── Mutators ───────────────────────────────────────────────────────────

    pub fn set_value_boolean(&mut self, _value: bool) -> Result<()> {
        Err(Error::Unimplemented("set_value_boolean"))
    }

    pub fn set_value_boolean_array(&mut self, _values: &[bool]) -> Result<()> {
        Err(Error::Unimplemented("set_value_boolean_array"))
    }

    pub fn set_value_int32(&mut self, value: i32) {
        self.value = ParameterValue::Int32(value);
    }

    pub fn set_value_int32_array(&mut self, _values: &[i32]) -> Result<()> {
        Err(Error::Unimplemented("set_value_int32_array"))
    }

    /// Write a matrix into existing `rows × columns` storage.
    ///
    /// The matrix is transposed and laid out row-major with a 4-wide stride;
    /// only the upper-left `rows × columns` block is copied. Storage is never
    /// reallocated.
    pub fn set_value_matrix(&mut self, value: Mat4) -> Result<()> {
        let rows = self.row_count as usize;
        let columns = self.column_count as usize;
        if rows > 4 || columns > 4 {
            return Err(self.not_supported("set_value_matrix"));
        }

        // Row-major layout of the transposed matrix is the column-major
        // layout of the original.
        let transposed = value.to_cols_array();

        if let ParameterValue::Singles(values) = &mut self.value {
            if values.len() >= rows * columns {
                for y in 0..rows {
                    for x in 0..columns {
                        values[y * columns + x] = transposed[y * 4 + x];
                    }
                }
                return Ok(());
            }
        }
        Err(self.mismatch("float sequence of rows * columns"))
    }

    pub fn set_value_matrix_array(&mut self, values: &[Mat4]) -> Result<()> {
        self.check_element_count(values.len())?;
        for (element, value) in self.elements.iter_mut().zip(values) {
            element.set_value_matrix(*value)?;
        }
        Ok(())
    }

    pub fn set_value_quaternion(&mut self, _value: Quat) -> Result<()> {
        Err(Error::Unimplemented("set_value_quaternion"))
    }

    pub fn set_value_quaternion_array(&mut self, _values: &[Quat]) -> Result<()> {
        Err(Error::Unimplemented("set_value_quaternion_array"))
    }

    /// Scalars are replaced; vectors and matrices get their first component
    /// overwritten in place.
    pub fn set_value_single(&mut self, value: f32) -> Result<()> {
        match self.class {
            ParameterClass::Scalar => {
                self.value = ParameterValue::Single(value);
                Ok(())
            }
            ParameterClass::Vector | ParameterClass::Matrix => {
                if let ParameterValue::Singles(values) = &mut self.value {
                    if let Some(first) = values.first_mut() {
                        *first = value;
                        return Ok(());
                    }
                }
                Err(self.mismatch("float sequence"))
            }
            _ => Err(self.not_supported("set_value_single")),
        }
    }

    /// Write one float per array element, in order.
    pub fn set_value_single_array(&mut self, values: &[f32]) -> Result<()> {
        self.check_element_count(values.len())?;
        for (element, value) in self.elements.iter_mut().zip(values) {
            element.set_value_single(*value)?;
        }
        Ok(())
    }

    pub fn set_value_string(&mut self, _value: &str) -> Result<()> {
        Err(Error::Unimplemented("set_value_string"))
    }

    /// Bind a texture, or clear the binding with `None`.
    pub fn set_value_texture(&mut self, texture: Option<TextureRef>) {
        self.value = match texture {
            Some(texture) => ParameterValue::Texture(texture),
            None => ParameterValue::None,
        };
    }

    pub fn set_value_vector2(&mut self, value: Vec2) {
        self.value = ParameterValue::Singles(value.to_array().to_vec());
    }

    pub fn set_value_vector2_array(&mut self, values: &[Vec2]) -> Result<()> {
        self.check_element_count(values.len())?;
        for (element, value) in self.elements.iter_mut().zip(values) {
            element.set_value_vector2(*value);
        }
        Ok(())
    }

    pub fn set_value_vector3(&mut self, value: Vec3) {
        self.value = ParameterValue::Singles(value.to_array().to_vec());
    }

    pub fn set_value_vector3_array(&mut self, values: &[Vec3]) -> Result<()> {
        self.check_element_count(values.len())?;
        for (element, value) in self.elements.iter_mut().zip(values) {
            element.set_value_vector3(*value);
        }
        Ok(())
    }

    pub fn set_value_vector4(&mut self, value: Vec4) {
        self.value = ParameterValue::Singles(value.to_array().to_vec());
    }

    pub fn set_value_vector4_array(&mut self, values: &[Vec4]) -> Result<()> {
        self.check_element_count(values.len())?;
        for (element, value) in self.elements.iter_mut().zip(values) {
            element.set_value_vector4(*value);
        }
        Ok(())
    }

    /// Replace the leaf with bytes of a native type the model does not
    /// interpret.
    pub fn set_value_raw(&mut self, native_type_code: u32, bytes: impl Into<Vec<u8>>) {
        self.value = ParameterValue::Raw {
            native_type_code,
            bytes: bytes.into(),
        };
    }

    // ── Constant packing ───────────────────────────────────────────────────

    /// Append the current values to `out`, depth first in declaration order.
    ///
    /// Values are tightly packed in host byte order: bools as `u32` 0/1,
    /// then `i32` and `f32` as stored. Textures, raw leaves and empty leaves
    /// contribute nothing.
    pub fn write_constants(&self, out: &mut Vec<u8>) {
        for element in self.elements.iter() {
            element.write_constants(out);
        }
        for member in self.struct_members.iter() {
            member.write_constants(out);
        }

        match &self.value {
            ParameterValue::Bool(value) => {
                out.extend_from_slice(bytemuck::bytes_of(&u32::from(*value)))
            }
            ParameterValue::Int32(value) => out.extend_from_slice(bytemuck::bytes_of(value)),
            ParameterValue::Single(value) => out.extend_from_slice(bytemuck::bytes_of(value)),
            ParameterValue::Singles(values) => {
                out.extend_from_slice(bytemuck::cast_slice(values.as_slice()))
            }
            ParameterValue::Int32s(values) => {
                out.extend_from_slice(bytemuck::cast_slice(values.as_slice()))
            }
            ParameterValue::Bools(values) => {
                for value in values {
                    out.extend_from_slice(bytemuck::bytes_of(&u32::from(*value)));
                }
            }
            ParameterValue::Texture(_) | ParameterValue::Raw { .. } | ParameterValue::None => {}
        }
    }

    pub fn constant_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_constants(&mut out);
        out
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} {} : {}",
            self.class, self.ty, self.name, self.semantic
        )
    }
}
