use crate::types::ParameterClass;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Reflection metadata names a class or type outside the unified model
    /// and no raw fallback applies.
    #[error("Unsupported parameter kind: {0}")]
    UnsupportedParameterKind(String),

    #[error("{op} is not supported on {class:?} parameter '{name}'")]
    NotSupported {
        op: &'static str,
        class: ParameterClass,
        name: String,
    },

    /// Part of the public parameter contract with no implementation yet.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    #[error("Index {index} out of bounds for parameter '{name}' with {len} elements")]
    IndexOutOfBounds {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("Parameter '{name}' holds {found}, expected {expected}")]
    ValueMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
