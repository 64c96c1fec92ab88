use helio_effect::reflection::{d3dx, ActiveUniform, D3dxParameter, GlslParameter};
use helio_effect::{
    build, Error, ParameterClass, ParameterDescriptor, ParameterType, ParameterValue,
    ReflectionSource, TypeCode, UniformType,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Compiled-effect record describing the same shape as `uniform`.
fn d3dx_equivalent(uniform: UniformType) -> D3dxParameter {
    let (rows, columns) = uniform.dimensions();
    let class = match uniform.parameter_class() {
        ParameterClass::Scalar => d3dx::class::SCALAR,
        ParameterClass::Vector => d3dx::class::VECTOR,
        ParameterClass::Matrix => d3dx::class::MATRIX_ROWS,
        ParameterClass::Object => d3dx::class::OBJECT,
        ParameterClass::Struct => d3dx::class::STRUCT,
    };
    let ty = match uniform.parameter_type() {
        ParameterType::Bool => d3dx::ty::BOOL,
        ParameterType::Int32 => d3dx::ty::INT,
        ParameterType::Single => d3dx::ty::FLOAT,
        ParameterType::Texture2D => d3dx::ty::TEXTURE2D,
        ParameterType::TextureCube => d3dx::ty::TEXTURECUBE,
        other => panic!("no uniform maps to {:?}", other),
    };
    D3dxParameter {
        name: "p".into(),
        class,
        ty,
        rows,
        columns,
        data: vec![0; uniform.byte_size()],
        ..Default::default()
    }
}

#[test]
fn uniform_and_compiled_effect_agree_on_shape() {
    init_logger();
    for uniform in UniformType::ALL {
        let from_uniform = ActiveUniform::new("p", uniform).build_parameter().unwrap();
        let from_effect = d3dx_equivalent(uniform).build_parameter().unwrap();

        assert_eq!(from_uniform.class(), from_effect.class(), "{:?}", uniform);
        assert_eq!(
            from_uniform.parameter_type(),
            from_effect.parameter_type(),
            "{:?}",
            uniform
        );
        assert_eq!(from_uniform.row_count(), from_effect.row_count(), "{:?}", uniform);
        assert_eq!(
            from_uniform.column_count(),
            from_effect.column_count(),
            "{:?}",
            uniform
        );
    }
}

#[test]
fn float_leaves_decode_identically_across_backends() {
    let values = [0.25f32, -1.0, 3.5, 8.0];
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();

    let from_uniform = ActiveUniform::new("u_tint", UniformType::FloatVec4)
        .with_data(bytes.clone())
        .build_parameter()
        .unwrap();
    let from_effect = D3dxParameter {
        name: "Tint".into(),
        class: d3dx::class::VECTOR,
        ty: d3dx::ty::FLOAT,
        rows: 1,
        columns: 4,
        data: bytes.clone(),
        ..Default::default()
    }
    .build_parameter()
    .unwrap();
    let from_glsl = GlslParameter {
        name: "Tint".into(),
        class: d3dx::class::VECTOR,
        ty: helio_effect::reflection::glsl::ty::SINGLE,
        rows: 1,
        columns: 4,
        data: bytes,
        ..Default::default()
    }
    .build_parameter()
    .unwrap();

    let expected = glam::Vec4::from_array(values);
    assert_eq!(from_uniform.get_value_vector4().unwrap(), expected);
    assert_eq!(from_effect.get_value_vector4().unwrap(), expected);
    assert_eq!(from_glsl.get_value_vector4().unwrap(), expected);
}

#[test]
fn single_bytes_keep_their_bit_pattern() {
    for value in [1.0f32, -0.0, f32::MIN_POSITIVE, 1.0e-40, 123_456.79] {
        let p = D3dxParameter {
            name: "Scale".into(),
            class: d3dx::class::SCALAR,
            ty: d3dx::ty::FLOAT,
            rows: 1,
            columns: 1,
            data: value.to_le_bytes().to_vec(),
            ..Default::default()
        }
        .build_parameter()
        .unwrap();
        assert_eq!(p.get_value_single().unwrap().to_bits(), value.to_bits());
    }
}

#[test]
fn oversized_effect_dimensions_fail_cleanly() {
    let record = D3dxParameter {
        name: "Huge".into(),
        class: d3dx::class::MATRIX_ROWS,
        ty: d3dx::ty::FLOAT,
        rows: 0x10000,
        columns: 0x10000,
        data: vec![0; 16],
        ..Default::default()
    };
    assert!(matches!(record.build_parameter(), Err(Error::Decode(_))));
}

#[test]
fn read_back_int_vectors_keep_their_constant_size() {
    let defaulted = ActiveUniform::new("u_ids", UniformType::IntVec3)
        .build_parameter()
        .unwrap();

    let data: Vec<u8> = [1i32, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
    let read_back = ActiveUniform::new("u_ids", UniformType::IntVec3)
        .with_data(data)
        .build_parameter()
        .unwrap();

    assert_eq!(read_back.value(), &ParameterValue::Int32s(vec![1, 2, 3]));
    assert_eq!(defaulted.constant_bytes().len(), 12);
    assert_eq!(read_back.constant_bytes().len(), 12);
}

#[test]
fn unknown_codes_without_raw_fallback_fail() {
    let desc = ParameterDescriptor::new("Mystery", TypeCode::Uniform(0xFFFF));
    assert!(matches!(
        build(&desc),
        Err(Error::UnsupportedParameterKind(_))
    ));

    let uniform = ActiveUniform {
        name: "Mystery".into(),
        uniform_type: 0xFFFF,
        array_size: 1,
        data: None,
    };
    assert!(matches!(
        uniform.build_parameter(),
        Err(Error::UnsupportedParameterKind(_))
    ));
}

#[test]
fn nested_effect_failure_aborts_the_whole_tree() {
    let bad = D3dxParameter {
        name: "Broken".into(),
        class: 99,
        ..Default::default()
    };
    let record = D3dxParameter {
        name: "Material".into(),
        class: d3dx::class::STRUCT,
        ty: d3dx::ty::VOID,
        member_count: 1,
        member_handles: vec![bad],
        ..Default::default()
    };
    assert!(matches!(
        record.build_parameter(),
        Err(Error::UnsupportedParameterKind(_))
    ));
}
