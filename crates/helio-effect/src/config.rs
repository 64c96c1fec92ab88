use serde::{Deserialize, Serialize};

/// Options for building parameter trees from reflection metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Transpose square matrix leaves while decoding their bytes.
    ///
    /// Off by default: stored matrix bytes are taken in the order the
    /// reflection buffer holds them, and only `set_value_matrix` transposes.
    /// Whether effect binaries need a read-side transpose is unresolved.
    pub transpose_matrices_on_read: bool,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transpose_matrices_on_read(mut self, enabled: bool) -> Self {
        self.transpose_matrices_on_read = enabled;
        self
    }
}
