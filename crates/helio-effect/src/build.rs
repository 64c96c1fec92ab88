//! Recursive construction of parameter trees from descriptors

use crate::classify::{classify, UniformType};
use crate::collection::ParameterCollection;
use crate::config::BuildConfig;
use crate::descriptor::{ParameterDescriptor, TypeCode};
use crate::parameter::Parameter;
use crate::types::{ParameterClass, ParameterType};
use crate::value::ParameterValue;
use crate::{Error, Result};

/// Build a parameter tree with the default [`BuildConfig`].
pub fn build(descriptor: &ParameterDescriptor) -> Result<Parameter> {
    build_with(descriptor, &BuildConfig::default())
}

/// Build a parameter tree. Any failing child aborts the whole tree.
pub fn build_with(descriptor: &ParameterDescriptor, config: &BuildConfig) -> Result<Parameter> {
    let parameter = build_node(descriptor, config)?;
    log::debug!(
        "Built effect parameter {} ({} elements, {} members)",
        parameter,
        parameter.elements().len(),
        parameter.struct_members().len()
    );
    Ok(parameter)
}

fn build_node(desc: &ParameterDescriptor, config: &BuildConfig) -> Result<Parameter> {
    let (class, ty) = resolve(desc.type_code)?;

    if !desc.elements.is_empty() && !desc.members.is_empty() {
        log::warn!(
            "Parameter '{}' declares both elements and struct members; members ignored",
            desc.name
        );
    }

    let mut elements = Vec::with_capacity(desc.elements.len());
    for element in &desc.elements {
        elements.push(build_node(element, config)?);
    }

    let mut members = Vec::new();
    if elements.is_empty() {
        members.reserve(desc.members.len());
        for member in &desc.members {
            members.push(build_node(member, config)?);
        }
    }

    let value = if elements.is_empty() && members.is_empty() {
        decode_leaf(desc, class, ty, config)?
    } else {
        ParameterValue::None
    };

    Ok(Parameter {
        class,
        ty,
        name: desc.name.as_str().into(),
        semantic: desc.semantic.as_str().into(),
        row_count: desc.row_count,
        column_count: desc.column_count,
        annotations: desc.annotations.clone().into(),
        elements: ParameterCollection::from(elements),
        struct_members: ParameterCollection::from(members),
        value,
    })
}

fn resolve(type_code: TypeCode) -> Result<(ParameterClass, ParameterType)> {
    match type_code {
        TypeCode::Resolved(class, ty) => Ok((class, ty)),
        TypeCode::Uniform(code) => classify(code),
        TypeCode::Raw { class, .. } => Ok((class, ParameterType::Void)),
    }
}

fn decode_leaf(
    desc: &ParameterDescriptor,
    class: ParameterClass,
    ty: ParameterType,
    config: &BuildConfig,
) -> Result<ParameterValue> {
    match desc.type_code {
        TypeCode::Raw {
            native_type_code, ..
        } => {
            return Ok(ParameterValue::Raw {
                native_type_code,
                bytes: desc.data.clone(),
            })
        }
        // Live uniforms carry no data until something is written.
        TypeCode::Uniform(code) if desc.data.is_empty() => {
            if let Some(uniform) = UniformType::from_code(code) {
                return Ok(uniform.default_value());
            }
        }
        _ => {}
    }

    let is_uniform = matches!(desc.type_code, TypeCode::Uniform(_));
    let value = match (class, ty) {
        (ParameterClass::Scalar, ParameterType::Bool) => {
            let byte = desc.data.first().ok_or_else(|| too_short(desc, 1))?;
            ParameterValue::Bool(*byte != 0)
        }
        (ParameterClass::Scalar, ParameterType::Int32) => {
            ParameterValue::Int32(i32::from_le_bytes(read_word(desc)?))
        }
        (ParameterClass::Scalar, ParameterType::Single) => {
            ParameterValue::Single(f32::from_le_bytes(read_word(desc)?))
        }
        (ParameterClass::Scalar, ParameterType::Void) => ParameterValue::None,
        (ParameterClass::Vector | ParameterClass::Matrix, ParameterType::Single) => {
            let mut values: Vec<f32> = read_words(desc)?.map(f32::from_le_bytes).collect();
            if config.transpose_matrices_on_read
                && class == ParameterClass::Matrix
                && desc.row_count == desc.column_count
            {
                transpose_square(&mut values, desc.row_count as usize);
            }
            ParameterValue::Singles(values)
        }
        // GL reads int and bool vectors back as 32-bit words.
        (ParameterClass::Vector, ParameterType::Int32) if is_uniform => {
            ParameterValue::Int32s(read_words(desc)?.map(i32::from_le_bytes).collect())
        }
        (ParameterClass::Vector, ParameterType::Bool) if is_uniform => ParameterValue::Bools(
            read_words(desc)?
                .map(|word| u32::from_le_bytes(word) != 0)
                .collect(),
        ),
        _ => {
            // Textures and samplers get bound through the resource path,
            // not through their value bytes.
            log::trace!(
                "Parameter '{}' ({:?} {:?}) has no decodable value",
                desc.name,
                class,
                ty
            );
            ParameterValue::None
        }
    };

    log::trace!("Decoded parameter '{}' as {}", desc.name, value.kind());
    Ok(value)
}

fn read_word(desc: &ParameterDescriptor) -> Result<[u8; 4]> {
    desc.data
        .get(..4)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| too_short(desc, 4))
}

/// The `rows * columns` words of a vector or matrix leaf. The buffer is
/// checked against the declared dimensions before anything is read.
fn read_words(desc: &ParameterDescriptor) -> Result<impl Iterator<Item = [u8; 4]> + '_> {
    let needed = (desc.row_count as usize)
        .checked_mul(desc.column_count as usize)
        .and_then(|count| count.checked_mul(4))
        .ok_or_else(|| {
            Error::Decode(format!(
                "parameter '{}' declares {}x{} values",
                desc.name, desc.row_count, desc.column_count
            ))
        })?;
    let bytes = desc.data.get(..needed).ok_or_else(|| too_short(desc, needed))?;
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]]))
}

fn too_short(desc: &ParameterDescriptor, needed: usize) -> Error {
    Error::Decode(format!(
        "parameter '{}' needs {} bytes, buffer holds {}",
        desc.name,
        needed,
        desc.data.len()
    ))
}

fn transpose_square(values: &mut [f32], n: usize) {
    for y in 0..n {
        for x in (y + 1)..n {
            values.swap(y * n + x, x * n + y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Annotation;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn scalar(name: &str, ty: ParameterType, data: Vec<u8>) -> ParameterDescriptor {
        ParameterDescriptor::resolved(name, ParameterClass::Scalar, ty, 1, 1).with_data(data)
    }

    #[test]
    fn decodes_scalars() {
        init_logger();
        let p = build(&scalar("Alpha", ParameterType::Single, 1.0f32.to_le_bytes().to_vec()))
            .unwrap();
        assert_eq!(p.value(), &ParameterValue::Single(1.0));
        assert_eq!(p.get_value_single().unwrap().to_bits(), 1.0f32.to_bits());

        let p = build(&scalar("Count", ParameterType::Int32, (-7i32).to_le_bytes().to_vec()))
            .unwrap();
        assert_eq!(p.value(), &ParameterValue::Int32(-7));

        let p = build(&scalar("Enabled", ParameterType::Bool, vec![1, 0, 0, 0])).unwrap();
        assert_eq!(p.value(), &ParameterValue::Bool(true));

        let p = build(&scalar("Nothing", ParameterType::Void, Vec::new())).unwrap();
        assert!(p.value().is_none());
    }

    #[test]
    fn decodes_matrix_without_transposing() {
        init_logger();
        let values: Vec<f32> = (0..16).map(|i| i as f32).collect();
        let desc = ParameterDescriptor::resolved(
            "World",
            ParameterClass::Matrix,
            ParameterType::Single,
            4,
            4,
        )
        .with_singles(&values);

        let p = build(&desc).unwrap();
        assert_eq!(p.value(), &ParameterValue::Singles(values.clone()));

        let config = BuildConfig::new().with_transpose_matrices_on_read(true);
        let p = build_with(&desc, &config).unwrap();
        let ParameterValue::Singles(stored) = p.value() else {
            panic!("expected float storage");
        };
        assert_eq!(stored[1], 4.0);
        assert_eq!(stored[4], 1.0);
        assert_eq!(stored[15], 15.0);
    }

    #[test]
    fn vector_decode_reads_rows_times_columns() {
        let desc = ParameterDescriptor::resolved(
            "Offset",
            ParameterClass::Vector,
            ParameterType::Single,
            1,
            3,
        )
        .with_singles(&[0.5, 1.5, 2.5, 99.0]);
        let p = build(&desc).unwrap();
        assert_eq!(p.value(), &ParameterValue::Singles(vec![0.5, 1.5, 2.5]));
    }

    #[test]
    fn short_buffer_is_a_decode_error() {
        let desc = ParameterDescriptor::resolved(
            "Offset",
            ParameterClass::Vector,
            ParameterType::Single,
            1,
            4,
        )
        .with_singles(&[0.5, 1.5]);
        assert!(matches!(build(&desc), Err(Error::Decode(_))));
    }

    #[test]
    fn oversized_dimensions_are_a_decode_error() {
        for (rows, columns) in [(0x10000, 0x10000), (u32::MAX, u32::MAX), (1, u32::MAX)] {
            let desc = ParameterDescriptor::resolved(
                "Huge",
                ParameterClass::Matrix,
                ParameterType::Single,
                rows,
                columns,
            )
            .with_singles(&[0.0; 4]);
            assert!(matches!(build(&desc), Err(Error::Decode(_))));
        }
    }

    #[test]
    fn uniform_int_and_bool_vectors_decode_their_words() {
        let ints: Vec<u8> = [1i32, -2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let desc = ParameterDescriptor::new("u_ids", TypeCode::Uniform(UniformType::IntVec3.code()))
            .with_dimensions(1, 3)
            .with_data(ints);
        assert_eq!(
            build(&desc).unwrap().value(),
            &ParameterValue::Int32s(vec![1, -2, 3])
        );

        let bools: Vec<u8> = [0u32, 7].iter().flat_map(|v| v.to_le_bytes()).collect();
        let desc =
            ParameterDescriptor::new("u_mask", TypeCode::Uniform(UniformType::BoolVec2.code()))
                .with_dimensions(1, 2)
                .with_data(bools);
        assert_eq!(
            build(&desc).unwrap().value(),
            &ParameterValue::Bools(vec![false, true])
        );
    }

    #[test]
    fn unrepresentable_leaves_have_no_value() {
        let desc = ParameterDescriptor::resolved(
            "Diffuse",
            ParameterClass::Object,
            ParameterType::Texture2D,
            0,
            0,
        )
        .with_data(vec![1, 2, 3, 4]);
        let p = build(&desc).unwrap();
        assert!(p.value().is_none());

        let desc = ParameterDescriptor::resolved(
            "Flags",
            ParameterClass::Vector,
            ParameterType::Int32,
            1,
            2,
        )
        .with_data(vec![0; 8]);
        assert!(build(&desc).unwrap().value().is_none());
    }

    #[test]
    fn raw_leaves_keep_their_bytes() {
        let desc = ParameterDescriptor::new(
            "Sampler",
            TypeCode::Raw {
                class: ParameterClass::Object,
                native_type_code: 12,
            },
        )
        .with_data(vec![9, 8, 7]);
        let p = build(&desc).unwrap();
        assert_eq!(p.parameter_type(), ParameterType::Void);
        assert_eq!(p.get_value_raw().unwrap(), (12, &[9u8, 8, 7][..]));
    }

    #[test]
    fn elements_take_precedence_over_members() {
        init_logger();
        let child = scalar("x", ParameterType::Single, 2.0f32.to_le_bytes().to_vec());
        let desc = ParameterDescriptor::resolved(
            "Weights",
            ParameterClass::Scalar,
            ParameterType::Single,
            1,
            1,
        )
        .with_elements(vec![child.clone(), child.clone()])
        .with_members(vec![child]);

        let p = build(&desc).unwrap();
        assert_eq!(p.elements().len(), 2);
        assert!(p.struct_members().is_empty());
        assert!(p.value().is_none());
    }

    #[test]
    fn failing_child_aborts_the_tree() {
        let bad = ParameterDescriptor::new("bad", TypeCode::Uniform(0xDEAD));
        let desc = ParameterDescriptor::resolved(
            "Light",
            ParameterClass::Struct,
            ParameterType::Void,
            0,
            0,
        )
        .with_members(vec![scalar("ok", ParameterType::Int32, vec![0; 4]), bad]);
        assert!(matches!(
            build(&desc),
            Err(Error::UnsupportedParameterKind(_))
        ));
    }

    #[test]
    fn uniform_without_data_is_default_initialized() {
        let desc = ParameterDescriptor::new("u_tint", TypeCode::Uniform(UniformType::FloatVec4.code()))
            .with_dimensions(1, 4);
        let p = build(&desc).unwrap();
        assert_eq!(p.class(), ParameterClass::Vector);
        assert_eq!(p.value(), &ParameterValue::Singles(vec![0.0; 4]));
    }

    #[test]
    fn annotations_are_carried_through() {
        let desc = scalar("Alpha", ParameterType::Single, vec![0; 4])
            .with_annotations(vec![Annotation::new("UIName"), Annotation::new("UIMin")]);
        let p = build(&desc).unwrap();
        let names: Vec<&str> = p.annotations().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["UIName", "UIMin"]);
    }
}
