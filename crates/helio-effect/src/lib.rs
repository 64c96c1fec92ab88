//! Helio Effect - runtime model of shader effect parameters
//!
//! Effect parameters arrive from two kinds of shader reflection: compiled
//! effect binaries, which describe each parameter with a class/type pair and a
//! raw value buffer, and live GL uniform introspection, which reports a single
//! uniform type code. Both are converted into a backend-neutral
//! [`ParameterDescriptor`] and built into the same [`Parameter`] tree:
//!
//! - Leaves decode their bytes into scalars, vectors and matrices
//! - Arrays and structs hold child parameters, built recursively
//! - Native types the model does not understand are kept as raw bytes
//!
//! Parameters are then read and written through typed `get_value_*` /
//! `set_value_*` calls before their values are packed into shader constants.

pub mod annotation;
pub mod build;
pub mod classify;
pub mod collection;
pub mod config;
pub mod descriptor;
pub mod parameter;
pub mod reflection;
pub mod types;
pub mod value;

mod error;

pub use annotation::{Annotation, AnnotationValue};
pub use build::{build, build_with};
pub use classify::{classify, UniformType};
pub use collection::ParameterCollection;
pub use config::BuildConfig;
pub use descriptor::{ParameterDescriptor, TypeCode};
pub use error::{Error, Result};
pub use parameter::Parameter;
pub use reflection::ReflectionSource;
pub use types::{ParameterClass, ParameterType};
pub use value::{ParameterValue, TextureRef};
