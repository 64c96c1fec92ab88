//! Backend-neutral parameter metadata
//!
//! Every reflection backend converts its native records into a
//! [`ParameterDescriptor`] tree, which [`crate::build`] turns into a
//! [`Parameter`](crate::Parameter).

use crate::annotation::Annotation;
use crate::types::{ParameterClass, ParameterType};

/// How a descriptor's class and type are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCode {
    /// Class and type already resolved by the reflection backend.
    Resolved(ParameterClass, ParameterType),
    /// GL active-uniform type code, classified during the build.
    Uniform(u32),
    /// Native type outside the unified model. Leaf bytes pass through
    /// untouched and the parameter type reads as `Void`.
    Raw {
        class: ParameterClass,
        native_type_code: u32,
    },
}

#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: String,
    pub semantic: String,
    pub type_code: TypeCode,
    pub row_count: u32,
    pub column_count: u32,
    pub annotations: Vec<Annotation>,
    /// Array elements. Takes precedence over `members`.
    pub elements: Vec<ParameterDescriptor>,
    /// Struct members.
    pub members: Vec<ParameterDescriptor>,
    /// Raw value bytes of a leaf.
    pub data: Vec<u8>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, type_code: TypeCode) -> Self {
        Self {
            name: name.into(),
            semantic: String::new(),
            type_code,
            row_count: 0,
            column_count: 0,
            annotations: Vec::new(),
            elements: Vec::new(),
            members: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn resolved(
        name: impl Into<String>,
        class: ParameterClass,
        ty: ParameterType,
        row_count: u32,
        column_count: u32,
    ) -> Self {
        Self::new(name, TypeCode::Resolved(class, ty)).with_dimensions(row_count, column_count)
    }

    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic = semantic.into();
        self
    }

    pub fn with_dimensions(mut self, row_count: u32, column_count: u32) -> Self {
        self.row_count = row_count;
        self.column_count = column_count;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_elements(mut self, elements: Vec<ParameterDescriptor>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_members(mut self, members: Vec<ParameterDescriptor>) -> Self {
        self.members = members;
        self
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Leaf data from a slice of floats, little-endian, in the order given.
    pub fn with_singles(self, values: &[f32]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.with_data(data)
    }
}
