//! Error types for synthesis and generated-instance access.

use shapeforge_types::{DataType, ValueTypeError};
use thiserror::Error;

/// Any failure while synthesizing a type.
///
/// Subject to the suppression policy of the originating `SchemaSpec`:
/// suppressed failures are logged and reported as `Ok(None)`, otherwise the
/// error is returned exactly as raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("Type '{class_name}' is already defined in module '{module}'")]
    DuplicateClass { class_name: String, module: String },

    #[error("Property '{property}' of type '{class_name}' has unsupported type {data_type}")]
    UnsupportedType {
        class_name: String,
        property: String,
        data_type: DataType,
    },

    #[error("Type '{class_name}' declares an invalid property name '{property}'")]
    InvalidPropertyName { class_name: String, property: String },

    #[error("Module container '{module}' is unusable: lock poisoned")]
    ContainerPoisoned { module: String },
}

impl SynthesisError {
    /// Class the failure belongs to, when known.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            SynthesisError::DuplicateClass { class_name, .. }
            | SynthesisError::UnsupportedType { class_name, .. }
            | SynthesisError::InvalidPropertyName { class_name, .. } => Some(class_name),
            SynthesisError::ContainerPoisoned { .. } => None,
        }
    }
}

/// Misuse of a generated instance's property bag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Type '{class_name}' has no property '{property}'")]
    UnknownProperty { class_name: String, property: String },

    #[error("Property '{class_name}.{property}' expects {expected}, got {found}")]
    TypeMismatch {
        class_name: String,
        property: String,
        expected: DataType,
        found: &'static str,
    },

    #[error(transparent)]
    Conversion(#[from] ValueTypeError),
}
