//! Ordered child parameter collections

use std::ops::{Index, IndexMut};

use crate::parameter::Parameter;

/// Array elements or struct members of a parameter, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ParameterCollection {
    parameters: Vec<Parameter>,
}

impl ParameterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Parameter> {
        self.parameters.get_mut(index)
    }

    /// First parameter with the given name.
    pub fn by_name(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name() == name)
    }

    /// First parameter with the given semantic, compared case-insensitively.
    pub fn by_semantic(&self, semantic: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.semantic().eq_ignore_ascii_case(semantic))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Parameter> {
        self.parameters.iter_mut()
    }
}

impl From<Vec<Parameter>> for ParameterCollection {
    fn from(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }
}

impl Index<usize> for ParameterCollection {
    type Output = Parameter;

    fn index(&self, index: usize) -> &Parameter {
        &self.parameters[index]
    }
}

impl IndexMut<usize> for ParameterCollection {
    fn index_mut(&mut self, index: usize) -> &mut Parameter {
        &mut self.parameters[index]
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl<'a> IntoIterator for &'a mut ParameterCollection {
    type Item = &'a mut Parameter;
    type IntoIter = std::slice::IterMut<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter_mut()
    }
}
