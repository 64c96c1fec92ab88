/// Metadata attached to a parameter. Carried through untouched; nothing in
/// this crate reads annotation values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotation {
    pub name: String,
    pub value: AnnotationValue,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnnotationValue {
    #[default]
    None,
    String(String),
    Bytes(Vec<u8>),
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AnnotationValue::None,
        }
    }

    pub fn with_value(mut self, value: AnnotationValue) -> Self {
        self.value = value;
        self
    }
}
